// indexer/src/util.rs

use std::{
    ffi::OsStr,
    path::{
        Component,
        Path
    }
};

/// Last `n` normal segments of `path`, outermost first.
/// `None` if the path is shorter than `n`.
pub fn trailing_segments(path: &Path, n: usize) -> Option<Vec<&OsStr>> {
    let mut segs: Vec<&OsStr> = path
        .components()
        .rev()
        .take(n)
        .map_while(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect();
    if segs.len() != n {
        return None;
    }
    segs.reverse();
    Some(segs)
}

/// All-or-nothing UTF-8 view of a segment list.
pub fn segments_to_str<'a>(segs: &[&'a OsStr]) -> Option<Vec<&'a str>> {
    segs.iter().map(|s| s.to_str()).collect()
}

/// `"json"`, `".json"` and `" .json "` all mean the same extension.
pub fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

/// Glob-style `*.<ext>` test on a raw file name. An empty extension matches
/// every name, like a bare `*`.
pub fn matches_ext(file_name: &OsStr, ext: &str) -> bool {
    if ext.is_empty() {
        return true;
    }
    let name = file_name.as_encoded_bytes();
    let ext = ext.as_bytes();
    name.len() > ext.len()
        && name.ends_with(ext)
        && name[name.len() - ext.len() - 1] == b'.'
}

/// Root-relative, forward-slash path for log lines.
pub fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn trailing_ignores_everything_above() {
        let p = PathBuf::from("/data/archive/2024-01-01/go/b.json");
        let segs = trailing_segments(&p, 3).unwrap();
        assert_eq!(segs, vec![OsStr::new("2024-01-01"), OsStr::new("go"), OsStr::new("b.json")]);
    }

    #[test]
    fn trailing_too_short() {
        assert!(trailing_segments(Path::new("go/b.json"), 3).is_none());
        assert!(trailing_segments(Path::new("/b.json"), 2).is_none());
    }

    #[test]
    fn ext_normalization() {
        assert_eq!(normalize_ext("json"), "json");
        assert_eq!(normalize_ext(".json"), "json");
        assert_eq!(normalize_ext(" .md "), "md");
    }

    #[test]
    fn ext_matching_is_glob_like() {
        assert!(matches_ext(OsStr::new("a.json"), "json"));
        assert!(matches_ext(OsStr::new(".json"), "json"));
        assert!(matches_ext(OsStr::new("a.b.json"), "json"));
        assert!(!matches_ext(OsStr::new("a.jsonl"), "json"));
        assert!(!matches_ext(OsStr::new("ajson"), "json"));
        assert!(!matches_ext(OsStr::new("json"), "json"));
        assert!(!matches_ext(OsStr::new("a.JSON"), "json"));
        assert!(matches_ext(OsStr::new("README"), ""));
    }

    #[test]
    fn rel_is_forward_slashed() {
        let root = Path::new("/r");
        assert_eq!(normalize_rel(root, Path::new("/r/2024/go/x.json")), "2024/go/x.json");
    }
}
