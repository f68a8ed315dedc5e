use crate::error::ShapeifyError;
use crate::filename::{is_contained_reference, normalize_reference};
use crate::fs_ops::{CopyOperation, write_output};
use std::fs;
use std::path::{Path, PathBuf};
use xmltree::{Element, EmitterConfig, XMLNode};

pub const TEXUNIT_PATH: [&str; 3] = ["material", "renderpass", "texunit"];
const MAP_PATH: [&str; 4] = ["material", "renderpass", "texunit", "map"];

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(|node| match node {
        XMLNode::Element(e) => Some(e),
        _ => None,
    })
}

fn elements_at<'a>(root: &'a Element, path: &[&str]) -> Vec<&'a Element> {
    let mut current = vec![root];
    for tag in path {
        current = current
            .into_iter()
            .flat_map(|e| child_elements(e).filter(move |c| c.name == *tag))
            .collect();
    }
    current
}

fn for_each_at_mut(element: &mut Element, path: &[&str], visit: &mut dyn FnMut(&mut Element)) {
    let Some((head, rest)) = path.split_first() else {
        visit(element);
        return;
    };
    for node in element.children.iter_mut() {
        if let XMLNode::Element(child) = node
            && child.name == *head
        {
            for_each_at_mut(child, rest, visit);
        }
    }
}

pub(crate) fn parse_element(source: &Path, text: &str) -> Result<Element, ShapeifyError> {
    Element::parse(text.as_bytes()).map_err(|e| ShapeifyError::xml(source, e))
}

// Children of a template's first texture unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GraftFragment {
    nodes: Vec<Element>,
}

impl GraftFragment {
    pub fn from_template(template: &Element, source: &Path) -> Result<Self, ShapeifyError> {
        let texunit = elements_at(template, &TEXUNIT_PATH)
            .into_iter()
            .next()
            .ok_or_else(|| ShapeifyError::MalformedTemplate {
                path: source.to_path_buf(),
                missing: TEXUNIT_PATH.join("/"),
            })?;
        Ok(Self {
            nodes: child_elements(texunit).cloned().collect(),
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDocument {
    name: String,
    source: PathBuf,
    root: Element,
}

impl MaterialDocument {
    pub fn load(path: &Path) -> Result<Self, ShapeifyError> {
        let text = fs::read_to_string(path).map_err(|e| ShapeifyError::file_access(path, e))?;
        Self::parse(path, &text)
    }

    pub fn parse(source: &Path, text: &str) -> Result<Self, ShapeifyError> {
        let root = parse_element(source, text)?;
        let name = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            name,
            source: source.to_path_buf(),
            root,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin_dir(&self) -> &Path {
        self.source.parent().unwrap_or(Path::new(""))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    #[cfg(test)]
    fn texunit_child_counts(&self) -> Vec<usize> {
        elements_at(&self.root, &TEXUNIT_PATH)
            .into_iter()
            .map(|t| child_elements(t).count())
            .collect()
    }

    pub fn grafted(&self, fragment: &GraftFragment) -> Self {
        let mut out = self.clone();
        for_each_at_mut(&mut out.root, &TEXUNIT_PATH, &mut |texunit: &mut Element| {
            texunit
                .children
                .extend(fragment.nodes.iter().cloned().map(XMLNode::Element));
        });
        out
    }

    pub fn texture_refs(&self) -> impl Iterator<Item = String> + '_ {
        elements_at(&self.root, &MAP_PATH)
            .into_iter()
            .filter_map(|map| map.get_text())
            .map(|text| normalize_reference(&text))
            .filter(|reference| !reference.is_empty())
    }

    // References that would leave `dst_root` come back as errors.
    pub fn texture_copies<'a>(
        &'a self,
        dst_root: &'a Path,
    ) -> impl Iterator<Item = Result<CopyOperation, ShapeifyError>> + 'a {
        let origin = self.origin_dir();
        self.texture_refs().map(move |reference| {
            if !is_contained_reference(&reference) {
                return Err(ShapeifyError::UnsafeReference {
                    path: self.source.clone(),
                    reference,
                });
            }
            Ok(CopyOperation::new(
                origin.join(&reference),
                dst_root.join(&reference),
            ))
        })
    }

    pub fn to_xml_bytes(&self) -> Result<Vec<u8>, ShapeifyError> {
        let mut out = Vec::new();
        let config = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("  ");
        self.root
            .write_with_config(&mut out, config)
            .map_err(|e| ShapeifyError::xml(&self.source, e))?;
        Ok(out)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ShapeifyError> {
        write_output(path, &self.to_xml_bytes()?)
    }
}
