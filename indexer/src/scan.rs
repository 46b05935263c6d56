// indexer/src/scan.rs

use chrono::NaiveDate;
use std::path::{
    Path,
    PathBuf
};
use tracing::{
    debug,
    info,
    warn
};
use walkdir::WalkDir;
use crate::{
    error::{
        IndexError,
        Result
    },
    index::Index,
    layout::{
        Layout,
        Shape
    },
    util
};


pub const DEFAULT_EXT: &str = "json";

/// Knobs for one scan. The default reproduces `*/*/*.json`.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub layout: Layout,
    /// Extension the final segment must carry, without the dot. Empty = any.
    pub extension: String,
    /// Drop matches whose date key is not a real `%Y-%m-%d` calendar date.
    pub strict_dates: bool,
    /// Traversal faults and non-UTF-8 segments abort instead of being skipped.
    pub strict: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            extension: DEFAULT_EXT.to_string(),
            strict_dates: false,
            strict: false,
        }
    }
}

/// One file that fit the layout, with its keys already derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub path: PathBuf,
    pub shape: Shape,
    pub date: String,
    pub language: String,
    pub file: String,
}

/// Lazy, single-pass sequence of matches. Consuming it walks the tree once;
/// a fresh scan needs a fresh `Matches`.
pub struct Matches {
    root: PathBuf,
    walker: Option<walkdir::IntoIter>,
    layout: Layout,
    extension: String,
    strict_dates: bool,
    strict: bool,
}

/// Start a scan under `root`. Nothing touches the filesystem until the
/// iterator is polled, except the root check.
pub fn scan(root: &Path, opts: &ScanOptions) -> Matches {
    let walker = if root.is_dir() {
        Some(
            WalkDir::new(root)
                .follow_links(true)
                .min_depth(opts.layout.min_depth())
                .max_depth(opts.layout.max_depth())
                .sort_by_file_name()
                .into_iter(),
        )
    } else {
        debug!(root = %root.display(), "root is not a directory; nothing to scan");
        None
    };

    Matches {
        root: root.to_path_buf(),
        walker,
        layout: opts.layout,
        extension: util::normalize_ext(&opts.extension),
        strict_dates: opts.strict_dates,
        strict: opts.strict,
    }
}

/// Scan `root` and group every match into a fresh index.
pub fn build_index(root: &Path, opts: &ScanOptions) -> Result<Index> {
    let mut index = Index::new();
    for m in scan(root, opts) {
        let m = m?;
        debug!(path = %m.path.display(), shape = %m.shape, date = %m.date, language = %m.language, "indexed");
        index.insert(m.date, m.language, m.file);
    }
    info!(
        root = %root.display(),
        dates = index.date_count(),
        languages = index.language_count(),
        files = index.file_count(),
        "scan complete"
    );
    Ok(index)
}

impl Iterator for Matches {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dent = match self.walker.as_mut()?.next()? {
                Ok(d) => d,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    if self.strict {
                        self.walker = None;
                        return Some(Err(IndexError::Walk { path, source: err }));
                    }
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !dent.file_type().is_file() {
                debug!(path = %util::normalize_rel(&self.root, dent.path()), "skipping: not a regular file");
                continue;
            }
            let Some(shape) = self.layout.shape_at(dent.depth()) else {
                debug!(path = %util::normalize_rel(&self.root, dent.path()), depth = dent.depth(), "skipping: depth fits no shape");
                continue;
            };
            if !util::matches_ext(dent.file_name(), &self.extension) {
                debug!(path = %util::normalize_rel(&self.root, dent.path()), ext = %self.extension, "skipping: extension mismatch");
                continue;
            }

            match self.classify(dent.path(), shape) {
                Ok(Some(m)) => return Some(Ok(m)),
                Ok(None) => continue,
                Err(e) => {
                    self.walker = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl Matches {
    fn classify(&self, path: &Path, shape: Shape) -> Result<Option<Match>> {
        let rel = util::normalize_rel(&self.root, path);
        let Some(raw) = util::trailing_segments(path, shape.depth()) else {
            return Ok(None);
        };
        let Some(segs) = util::segments_to_str(&raw) else {
            if self.strict {
                return Err(IndexError::NonUtf8(path.to_path_buf()));
            }
            warn!(path = %rel, "skipping path with non-UTF-8 segment");
            return Ok(None);
        };
        let Some(key) = shape.derive_key(&segs) else {
            return Ok(None);
        };

        if self.strict_dates && NaiveDate::parse_from_str(&key.date, "%Y-%m-%d").is_err() {
            debug!(path = %rel, date = %key.date, "skipping: not a calendar date");
            return Ok(None);
        }

        Ok(Some(Match {
            path: path.to_path_buf(),
            shape,
            date: key.date.into_owned(),
            language: key.language.to_string(),
            file: key.file.to_string(),
        }))
    }
}
