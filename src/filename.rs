use std::path::{Component, Path, PathBuf};

// A file name without `match_token` only gets its suffix and directory
// changed; template loading rejects such names before they get here.
pub fn resolve(
    template: &Path,
    match_token: &str,
    replacement: &str,
    new_suffix: &str,
    dest_dir: &Path,
) -> PathBuf {
    let file_name = template
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let renamed = PathBuf::from(file_name.replace(match_token, replacement))
        .with_extension(new_suffix.trim_start_matches('.'));
    dest_dir.join(renamed)
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn normalize_reference(reference: &str) -> String {
    reference.trim().replace('\\', "/")
}

// Only plain relative references may be joined onto an output root.
pub fn is_contained_reference(reference: &str) -> bool {
    Path::new(reference)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

// Lexical only; `None` when the two paths do not share an anchor.
pub fn relative_posix(path: &Path, base: &Path) -> Option<String> {
    let path: Vec<Component> = path
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let base: Vec<Component> = base
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let anchored = |comps: &[Component]| {
        matches!(comps.first(), Some(Component::RootDir | Component::Prefix(_)))
    };
    if anchored(&path) != anchored(&base) {
        return None;
    }

    let common = path
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && anchored(&path) {
        return None;
    }
    if base[common..]
        .iter()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let mut parts: Vec<String> = base[common..].iter().map(|_| "..".to_string()).collect();
    for comp in &path[common..] {
        match comp {
            Component::Normal(v) => parts.push(v.to_string_lossy().to_string()),
            Component::ParentDir => parts.push("..".to_string()),
            _ => return None,
        }
    }

    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}
