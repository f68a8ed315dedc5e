use crate::error::ShapeifyError;
use crate::filename::normalize_reference;
use std::fs;
use std::path::{Path, PathBuf};

const SCENE_OBJECT_TAG: &str = "sceneobject";
const PREVIEW_TAG: &str = "preview";
const USER_COLOR_TAG: &str = "usercolor";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSceneObject {
    pub dir: PathBuf,
    pub preview: Option<String>,
    // exact source text of each usercolor element
    pub user_colors: Vec<String>,
}

impl SourceSceneObject {
    pub fn load(path: &Path) -> Result<Self, ShapeifyError> {
        let text = fs::read_to_string(path).map_err(|e| ShapeifyError::file_access(path, e))?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&dir, &text).map_err(|e| ShapeifyError::xml(path, e))
    }

    pub fn parse(dir: &Path, text: &str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        let scene_objects: Vec<roxmltree::Node> = doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name(SCENE_OBJECT_TAG))
            .collect();

        let preview = scene_objects
            .iter()
            .flat_map(|so| so.children())
            .find(|n| n.has_tag_name(PREVIEW_TAG))
            .and_then(|n| n.text())
            .map(normalize_reference)
            .filter(|p| !p.is_empty());

        let user_colors = scene_objects
            .iter()
            .flat_map(|so| so.children().filter(|n| n.has_tag_name(USER_COLOR_TAG)))
            .map(|n| text[n.range()].to_string())
            .collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            preview,
            user_colors,
        })
    }
}
