use crate::error::ShapeifyError;
use crate::filename::{capitalize, resolve};
use crate::material::{GraftFragment, parse_element};
use crate::placeholder::{ReplacementMap, substitute};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const TEMPLATE_EXT: &str = "xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Material,
    SceneObject,
}

impl TemplateKind {
    pub fn prefix(self) -> &'static str {
        match self {
            TemplateKind::Material => "[mat",
            TemplateKind::SceneObject => "[sco",
        }
    }

    pub fn name_token(self) -> &'static str {
        match self {
            TemplateKind::Material => "[mat]",
            TemplateKind::SceneObject => "[sco]",
        }
    }

    pub fn output_suffix(self) -> &'static str {
        match self {
            TemplateKind::Material => ".nl2mat",
            TemplateKind::SceneObject => ".nl2sco",
        }
    }

    pub fn classify(file_name: &str) -> Option<Self> {
        let is_xml = Path::new(file_name)
            .extension()
            .is_some_and(|e| e == TEMPLATE_EXT);
        if !is_xml {
            return None;
        }
        [TemplateKind::Material, TemplateKind::SceneObject]
            .into_iter()
            .find(|kind| file_name.starts_with(kind.prefix()))
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Material => f.write_str("material"),
            TemplateKind::SceneObject => f.write_str("scene object"),
        }
    }
}

fn check_name_token(path: &Path, kind: TemplateKind) -> Result<(), ShapeifyError> {
    let has_token = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().contains(kind.name_token()));
    if has_token {
        Ok(())
    } else {
        Err(ShapeifyError::TemplateName {
            path: path.to_path_buf(),
            token: kind.name_token(),
        })
    }
}

fn read_template(path: &Path) -> Result<String, ShapeifyError> {
    fs::read_to_string(path).map_err(|e| ShapeifyError::file_access(path, e))
}

#[derive(Debug, Clone)]
pub struct MaterialTemplate {
    pub path: PathBuf,
    pub fragment: GraftFragment,
}

impl MaterialTemplate {
    pub fn load(path: &Path) -> Result<Self, ShapeifyError> {
        check_name_token(path, TemplateKind::Material)?;
        let root = parse_element(path, &read_template(path)?)?;
        let fragment = GraftFragment::from_template(&root, path)?;
        Ok(Self {
            path: path.to_path_buf(),
            fragment,
        })
    }

    pub fn output_path(&self, material_name: &str, dest_dir: &Path) -> PathBuf {
        let kind = TemplateKind::Material;
        resolve(
            &self.path,
            kind.name_token(),
            &format!("[{material_name}]"),
            kind.output_suffix(),
            dest_dir,
        )
    }
}

#[derive(Debug, Clone)]
pub struct SceneObjectTemplate {
    pub path: PathBuf,
    pub text: String,
}

impl SceneObjectTemplate {
    pub fn load(path: &Path) -> Result<Self, ShapeifyError> {
        check_name_token(path, TemplateKind::SceneObject)?;
        Ok(Self {
            path: path.to_path_buf(),
            text: read_template(path)?,
        })
    }

    pub fn output_path(&self, material_name: &str, dest_dir: &Path) -> PathBuf {
        let kind = TemplateKind::SceneObject;
        resolve(
            &self.path,
            kind.name_token(),
            &capitalize(material_name),
            kind.output_suffix(),
            dest_dir,
        )
    }

    pub fn render(&self, replacements: &ReplacementMap) -> String {
        substitute(&self.text, replacements)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub materials: Vec<MaterialTemplate>,
    pub scene_objects: Vec<SceneObjectTemplate>,
    pub warnings: Vec<String>,
}

impl TemplateSet {
    pub fn discover(dir: &Path) -> Self {
        if !dir.is_dir() {
            warn!("template directory {} does not exist", dir.display());
        }
        let (material_paths, scene_object_paths) = template_paths(dir);
        let mut set = Self::default();

        for path in material_paths {
            match MaterialTemplate::load(&path) {
                Ok(t) => set.materials.push(t),
                Err(err) => set.reject(err),
            }
        }
        for path in scene_object_paths {
            match SceneObjectTemplate::load(&path) {
                Ok(t) => set.scene_objects.push(t),
                Err(err) => set.reject(err),
            }
        }

        log_found(
            TemplateKind::Material,
            set.materials.iter().map(|t| t.path.as_path()),
        );
        log_found(
            TemplateKind::SceneObject,
            set.scene_objects.iter().map(|t| t.path.as_path()),
        );

        if set.materials.is_empty() {
            set.reject(ShapeifyError::MissingTemplate {
                kind: TemplateKind::Material,
                dir: dir.to_path_buf(),
            });
        }
        if set.scene_objects.is_empty() {
            set.reject(ShapeifyError::MissingTemplate {
                kind: TemplateKind::SceneObject,
                dir: dir.to_path_buf(),
            });
        }
        set
    }

    fn reject(&mut self, err: ShapeifyError) {
        warn!("{err}");
        self.warnings.push(err.to_string());
    }
}

fn log_found<'a>(kind: TemplateKind, paths: impl Iterator<Item = &'a Path>) {
    let listing: Vec<String> = paths.map(|p| format!("\t{}", p.display())).collect();
    info!("found the following {kind} templates:\n{}", listing.join("\n"));
}

pub fn template_paths(dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut materials = Vec::new();
    let mut scene_objects = Vec::new();

    let Ok(entries) = fs::read_dir(dir) else {
        return (materials, scene_objects);
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        match TemplateKind::classify(&name) {
            Some(TemplateKind::Material) => materials.push(path),
            Some(TemplateKind::SceneObject) => scene_objects.push(path),
            None => {}
        }
    }
    materials.sort();
    scene_objects.sort();
    (materials, scene_objects)
}
