use crate::cli::Cli;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_NL2MAT_OUT: &str = "Scaleable Build Shapes/resources/materials/";
pub const DEFAULT_NL2SCO_OUT: &str = "Scaleable Build Shapes/";
pub const DEFAULT_PREVIEW_OUT: &str = "Scaleable Build Shapes/resources/previews/";
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

// Nothing below this reads the environment or the process location.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfiguration {
    pub material_out: PathBuf,
    pub scene_object_out: PathBuf,
    pub preview_out: PathBuf,
    pub template_dir: PathBuf,
    pub scale: Option<f32>,
}

impl RunConfiguration {
    pub fn from_cli(cli: &Cli, base_dir: &Path) -> Self {
        Self {
            material_out: base_dir.join(&cli.nl2mat_out),
            scene_object_out: base_dir.join(&cli.nl2sco_out),
            preview_out: base_dir.join(&cli.preview_out),
            template_dir: base_dir.join(&cli.templates),
            scale: cli.scale,
        }
    }

    pub fn ensure_output_roots(&self) -> Result<()> {
        for dir in [&self.material_out, &self.scene_object_out, &self.preview_out] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed creating output directory {}", dir.display()))?;
        }
        Ok(())
    }
}

pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed locating the executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("Executable path has no parent directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn relative_paths_resolve_against_base() {
        let cli = Cli::parse_from(["buildshapeify", "--preview-out", "/abs/previews"]);
        let cfg = RunConfiguration::from_cli(&cli, Path::new("/opt/tool"));
        assert_eq!(
            cfg.material_out,
            PathBuf::from("/opt/tool/Scaleable Build Shapes/resources/materials/")
        );
        assert_eq!(cfg.scene_object_out, PathBuf::from("/opt/tool/Scaleable Build Shapes/"));
        assert_eq!(cfg.preview_out, PathBuf::from("/abs/previews"));
        assert_eq!(cfg.template_dir, PathBuf::from("/opt/tool/templates"));
        assert!(cfg.scale.is_none());
    }

    #[test]
    fn unwritable_output_root_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();
        let cli = Cli::parse_from(["buildshapeify", "--nl2mat-out", "blocker/materials"]);
        let cfg = RunConfiguration::from_cli(&cli, dir.path());
        assert!(cfg.ensure_output_roots().is_err());
    }
}
