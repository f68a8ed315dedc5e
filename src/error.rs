use crate::template::TemplateKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

// None of these abort a run; each one costs a single artifact.
#[derive(Error, Debug)]
pub enum ShapeifyError {
    #[error("no {kind} templates found in {}", .dir.display())]
    MissingTemplate { kind: TemplateKind, dir: PathBuf },
    #[error("template {} is missing the required path '{missing}'", .path.display())]
    MalformedTemplate { path: PathBuf, missing: String },
    #[error("template file name {} does not contain the '{token}' token", .path.display())]
    TemplateName { path: PathBuf, token: &'static str },
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reference '{reference}' in {} points outside its output root", .path.display())]
    UnsafeReference { path: PathBuf, reference: String },
    #[error("invalid XML in {}: {message}", .path.display())]
    Xml { path: PathBuf, message: String },
}

impl ShapeifyError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn xml(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Xml {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
