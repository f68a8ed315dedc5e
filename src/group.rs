use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const MATERIAL_EXT: &str = "nl2mat";
pub const SCENE_OBJECT_EXT: &str = "nl2sco";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunGroup {
    pub scene_object: Option<PathBuf>,
    pub materials: Vec<PathBuf>,
    pub ignored_scene_objects: Vec<PathBuf>,
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}

fn files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed reading {}", dir.display()))? {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        if path.is_file() && has_ext(&path, ext) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

impl RunGroup {
    pub fn single(material: &Path, scene_object: Option<&Path>) -> Self {
        Self {
            scene_object: scene_object.map(Path::to_path_buf),
            materials: vec![material.to_path_buf()],
            ignored_scene_objects: Vec::new(),
        }
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut scene_objects = files_with_ext(dir, SCENE_OBJECT_EXT)?.into_iter();
        let scene_object = scene_objects.next();
        let ignored_scene_objects: Vec<PathBuf> = scene_objects.collect();

        if let Some(picked) = &scene_object
            && !ignored_scene_objects.is_empty()
        {
            warn!(
                "found more than one .{SCENE_OBJECT_EXT} file in {}, only one can be used; picked {}",
                dir.display(),
                picked.display()
            );
        }

        Ok(Self {
            scene_object,
            materials: files_with_ext(dir, MATERIAL_EXT)?,
            ignored_scene_objects,
        })
    }

    pub fn has_data(&self) -> bool {
        !self.materials.is_empty()
    }
}

pub fn groups_from_paths(files: &[PathBuf], loose_scene_object: Option<&Path>) -> Vec<RunGroup> {
    let mut loose = RunGroup {
        scene_object: loose_scene_object.map(Path::to_path_buf),
        ..RunGroup::default()
    };
    let mut groups = Vec::new();

    for path in files {
        if path.is_dir() {
            match RunGroup::from_dir(path) {
                Ok(group) if group.has_data() => groups.push(group),
                Ok(_) => info!("no .{MATERIAL_EXT} files in {}", path.display()),
                Err(err) => warn!("skipped {}: {err:#}", path.display()),
            }
        } else if path.is_file() && has_ext(path, MATERIAL_EXT) {
            loose.materials.push(path.clone());
        } else {
            warn!(
                "ignoring {}, it is neither a directory nor a .{MATERIAL_EXT} file",
                path.display()
            );
        }
    }

    if loose.has_data() {
        groups.insert(0, loose);
    }
    groups
}
