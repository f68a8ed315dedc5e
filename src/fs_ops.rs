use crate::error::ShapeifyError;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOperation {
    pub src: PathBuf,
    pub dst: PathBuf,
}

impl CopyOperation {
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    pub fn execute(&self) -> Result<u64, ShapeifyError> {
        // fs::copy onto itself truncates the source
        if self.is_same_file() {
            return Err(ShapeifyError::file_access(
                &self.src,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} is the same file", self.dst.display()),
                ),
            ));
        }
        ensure_parent_dir(&self.dst)?;
        fs::copy(&self.src, &self.dst).map_err(|e| ShapeifyError::file_access(&self.src, e))
    }

    fn is_same_file(&self) -> bool {
        match (fs::canonicalize(&self.src), fs::canonicalize(&self.dst)) {
            (Ok(src), Ok(dst)) => src == dst,
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct CopyOutcome {
    pub copied: Vec<CopyOperation>,
    pub failed: Vec<(CopyOperation, ShapeifyError)>,
}

pub fn copy_files(ops: impl IntoIterator<Item = CopyOperation>) -> CopyOutcome {
    let mut outcome = CopyOutcome::default();
    for op in ops {
        info!("copying {} to {}", op.src.display(), op.dst.display());
        match op.execute() {
            Ok(_) => outcome.copied.push(op),
            Err(err) => {
                warn!(
                    "skipped {}, the file cannot be accessed (maybe it references an internal file): {}",
                    op.src.display(),
                    err
                );
                outcome.failed.push((op, err));
            }
        }
    }
    outcome
}

pub fn write_output(path: &Path, content: &[u8]) -> Result<(), ShapeifyError> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| ShapeifyError::file_access(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<(), ShapeifyError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ShapeifyError::file_access(parent, e))?;
    }
    Ok(())
}
