use crate::config::RunConfiguration;
use crate::error::ShapeifyError;
use crate::fs_ops::{CopyOperation, CopyOutcome, copy_files, write_output};
use crate::group::RunGroup;
use crate::material::MaterialDocument;
use crate::placeholder::{Placeholder, ReplacementMap, build_baseline, scale_settings};
use crate::scene_object::SourceSceneObject;
use crate::template::TemplateSet;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SkippedItem {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub materials_generated: Vec<PathBuf>,
    pub scene_objects_generated: Vec<PathBuf>,
    pub files_copied: Vec<CopyOperation>,
    pub skipped: Vec<SkippedItem>,
    pub warnings: Vec<String>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string(),
            materials_generated: Vec::new(),
            scene_objects_generated: Vec::new(),
            files_copied: Vec::new(),
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn skip(&mut self, path: &Path, err: &ShapeifyError) {
        self.skipped.push(SkippedItem {
            path: path.to_path_buf(),
            reason: err.to_string(),
        });
    }

    fn record_copies(&mut self, outcome: CopyOutcome) {
        self.files_copied.extend(outcome.copied);
        for (op, err) in outcome.failed {
            self.skip(&op.src, &err);
        }
    }
}

pub struct Generator<'a> {
    config: &'a RunConfiguration,
    templates: &'a TemplateSet,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a RunConfiguration, templates: &'a TemplateSet) -> Self {
        Self { config, templates }
    }

    pub fn run(&self, groups: &[RunGroup]) -> RunReport {
        let mut report = RunReport::new();
        report.warnings.extend(self.templates.warnings.iter().cloned());
        for group in groups {
            self.process_group(group, &mut report);
        }
        report
    }

    pub fn run_single(&self, material: &Path, scene_object: Option<&Path>) -> RunReport {
        self.run(&[RunGroup::single(material, scene_object)])
    }

    fn process_group(&self, group: &RunGroup, report: &mut RunReport) {
        if let Some(picked) = &group.scene_object
            && !group.ignored_scene_objects.is_empty()
        {
            report.warnings.push(format!(
                "more than one scene object next to {}, ignored: {}",
                picked.display(),
                group
                    .ignored_scene_objects
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let baseline = self.group_baseline(group.scene_object.as_deref(), report);
        for material in &group.materials {
            self.process_material(material, &baseline, report);
        }
    }

    fn group_baseline(&self, scene_object: Option<&Path>, report: &mut RunReport) -> ReplacementMap {
        let source = scene_object.and_then(|path| match SourceSceneObject::load(path) {
            Ok(source) => Some(source),
            Err(err) => {
                warn!("ignoring source scene object: {err}");
                report.skip(path, &err);
                None
            }
        });

        let replacements = build_baseline(
            source.as_ref(),
            &self.config.preview_out,
            &self.config.scene_object_out,
        );
        if let (Some(err), Some(path)) = (&replacements.rejected_preview, scene_object) {
            report.skip(path, err);
        }
        report.record_copies(copy_files(replacements.preview_copy));

        let mut map = replacements.map;
        if let Some(scale) = self.config.scale {
            map.set(Placeholder::ScaleSettings, scale_settings(scale));
        }
        map
    }

    fn process_material(&self, path: &Path, baseline: &ReplacementMap, report: &mut RunReport) {
        let document = match MaterialDocument::load(path) {
            Ok(document) => document,
            Err(err) => {
                warn!("skipped {}: {err}", path.display());
                report.skip(path, &err);
                return;
            }
        };

        self.graft_materials(&document, report);
        self.copy_textures(&document, report);
        let replacements = baseline.with_material_name(document.name());
        self.generate_scene_objects(document.name(), &replacements, report);
    }

    fn graft_materials(&self, document: &MaterialDocument, report: &mut RunReport) {
        for template in &self.templates.materials {
            let dst = template.output_path(document.name(), &self.config.material_out);
            info!("creating {}", dst.display());
            match document.grafted(&template.fragment).write_to(&dst) {
                Ok(()) => report.materials_generated.push(dst),
                Err(err) => {
                    warn!("skipped {}: {err}", dst.display());
                    report.skip(&dst, &err);
                }
            }
        }
    }

    fn copy_textures(&self, document: &MaterialDocument, report: &mut RunReport) {
        let copies = document
            .texture_copies(&self.config.material_out)
            .filter_map(|copy| match copy {
                Ok(op) => Some(op),
                Err(err) => {
                    warn!("skipped texture: {err}");
                    report.skip(document.source(), &err);
                    None
                }
            });
        let outcome = copy_files(copies);
        report.record_copies(outcome);
    }

    fn generate_scene_objects(
        &self,
        material_name: &str,
        replacements: &ReplacementMap,
        report: &mut RunReport,
    ) {
        for template in &self.templates.scene_objects {
            let dst = template.output_path(material_name, &self.config.scene_object_out);
            info!("creating {}", dst.display());
            match write_output(&dst, template.render(replacements).as_bytes()) {
                Ok(()) => report.scene_objects_generated.push(dst),
                Err(err) => {
                    warn!("skipped {}: {err}", dst.display());
                    report.skip(&dst, &err);
                }
            }
        }
    }
}
