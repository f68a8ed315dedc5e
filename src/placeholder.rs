use crate::error::ShapeifyError;
use crate::filename::{is_contained_reference, relative_posix};
use crate::fs_ops::CopyOperation;
use crate::scene_object::SourceSceneObject;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

// No token may be a substring of another, otherwise the substitution order
// would change the result. Keep it that way when adding tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Preview,
    OriginalUserColors,
    ScaleSettings,
    MaterialName,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Preview,
        Placeholder::OriginalUserColors,
        Placeholder::ScaleSettings,
        Placeholder::MaterialName,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Preview => "{preview}",
            Placeholder::OriginalUserColors => "{original_usercolors}",
            Placeholder::ScaleSettings => "{scale_settings}",
            Placeholder::MaterialName => "{material_name}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementMap {
    values: BTreeMap<Placeholder, String>,
}

impl Default for ReplacementMap {
    fn default() -> Self {
        Self {
            values: Placeholder::ALL
                .iter()
                .map(|p| (*p, String::new()))
                .collect(),
        }
    }
}

impl ReplacementMap {
    pub fn get(&self, placeholder: Placeholder) -> &str {
        self.values
            .get(&placeholder)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    pub fn with_material_name(&self, material_name: &str) -> Self {
        let mut out = self.clone();
        out.set(Placeholder::MaterialName, material_name);
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }
}

// The preview copy is only scheduled here; running it is up to the caller.
#[derive(Debug)]
pub struct Replacements {
    pub map: ReplacementMap,
    pub preview_copy: Option<CopyOperation>,
    pub rejected_preview: Option<ShapeifyError>,
}

pub fn build_baseline(
    source: Option<&SourceSceneObject>,
    dest_preview_dir: &Path,
    dest_sco_dir: &Path,
) -> Replacements {
    let mut map = ReplacementMap::default();
    let mut preview_copy = None;
    let mut rejected_preview = None;

    let Some(source) = source else {
        return Replacements {
            map,
            preview_copy,
            rejected_preview,
        };
    };

    match &source.preview {
        Some(preview) if !is_contained_reference(preview) => {
            let err = ShapeifyError::UnsafeReference {
                path: source.dir.clone(),
                reference: preview.clone(),
            };
            warn!("skipped preview: {err}");
            rejected_preview = Some(err);
        }
        Some(preview) => {
            let src = source.dir.join(preview);
            let dst = dest_preview_dir.join(preview);
            let reference = relative_posix(&dst, dest_sco_dir).unwrap_or_else(|| {
                warn!(
                    "{} cannot be expressed relative to {}, using it as is",
                    dst.display(),
                    dest_sco_dir.display()
                );
                dst.to_string_lossy().replace('\\', "/")
            });
            map.set(
                Placeholder::Preview,
                format!("<preview>{reference}</preview>"),
            );
            preview_copy = Some(CopyOperation::new(src, dst));
        }
        None => {}
    }

    if !source.user_colors.is_empty() {
        map.set(Placeholder::OriginalUserColors, source.user_colors.join("\n"));
    }

    Replacements {
        map,
        preview_copy,
        rejected_preview,
    }
}

pub fn scale_settings(scale: f32) -> String {
    format!("<scale>{scale}</scale>")
}

// Unknown `{...}` sequences are left alone.
pub fn substitute(text: &str, map: &ReplacementMap) -> String {
    let mut out = text.to_string();
    for (placeholder, value) in map.iter() {
        out = out.replace(placeholder.token(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source() -> SourceSceneObject {
        SourceSceneObject {
            dir: PathBuf::from("/assets/crates"),
            preview: Some("img/preview.jpg".to_string()),
            user_colors: vec![
                r#"<usercolor name="A"/>"#.to_string(),
                r#"<usercolor name="B" v="1"/>"#.to_string(),
            ],
        }
    }

    #[test]
    fn tokens_are_not_substrings_of_each_other() {
        for a in Placeholder::ALL {
            for b in Placeholder::ALL {
                if a != b {
                    assert!(!a.token().contains(b.token()), "{a:?} contains {b:?}");
                }
            }
        }
    }

    #[test]
    fn defaults_are_empty_except_material_name() {
        let out = build_baseline(None, Path::new("/x"), Path::new("/y"));
        assert!(out.preview_copy.is_none());
        let map = out.map.with_material_name("Red");
        assert_eq!(map.get(Placeholder::Preview), "");
        assert_eq!(map.get(Placeholder::OriginalUserColors), "");
        assert_eq!(map.get(Placeholder::ScaleSettings), "");
        assert_eq!(map.get(Placeholder::MaterialName), "Red");
    }

    #[test]
    fn preview_is_relative_to_scene_object_dir() {
        let out = build_baseline(
            Some(&source()),
            Path::new("/out/previews"),
            Path::new("/out"),
        );
        assert_eq!(
            out.map.get(Placeholder::Preview),
            "<preview>previews/img/preview.jpg</preview>"
        );
        assert_eq!(
            out.preview_copy,
            Some(CopyOperation::new(
                "/assets/crates/img/preview.jpg",
                "/out/previews/img/preview.jpg"
            ))
        );
    }

    #[test]
    fn preview_outside_its_directory_is_rejected() {
        for preview in ["/tmp/abs.jpg", "../shared/preview.jpg"] {
            let mut sco = source();
            sco.preview = Some(preview.to_string());
            let out = build_baseline(Some(&sco), Path::new("/out/previews"), Path::new("/out"));
            assert!(out.preview_copy.is_none());
            assert_eq!(out.map.get(Placeholder::Preview), "");
            assert!(matches!(
                out.rejected_preview,
                Some(ShapeifyError::UnsafeReference { .. })
            ));
            assert!(!out.map.get(Placeholder::OriginalUserColors).is_empty());
        }
    }

    #[test]
    fn user_colors_are_joined_in_order() {
        let out = build_baseline(Some(&source()), Path::new("/p"), Path::new("/s"));
        assert_eq!(
            out.map.get(Placeholder::OriginalUserColors),
            "<usercolor name=\"A\"/>\n<usercolor name=\"B\" v=\"1\"/>"
        );
        assert_eq!(out.map.get(Placeholder::MaterialName), "");
    }

    #[test]
    fn substitute_replaces_known_tokens_only() {
        let mut map = ReplacementMap::default().with_material_name("Red");
        map.set(Placeholder::ScaleSettings, scale_settings(2.5));
        let text = "<name>{material_name}</name>{scale_settings}{preview}{unknown}";
        assert_eq!(
            substitute(text, &map),
            "<name>Red</name><scale>2.5</scale>{unknown}"
        );
    }

    #[test]
    fn substitute_is_repeatable() {
        let map = build_baseline(Some(&source()), Path::new("/o/p"), Path::new("/o"))
            .map
            .with_material_name("Oak");
        let text = "{preview}\n{original_usercolors}\n{material_name}";
        assert_eq!(substitute(text, &map), substitute(text, &map));
    }
}
