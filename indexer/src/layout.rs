// indexer/src/layout.rs
//! Directory shapes the indexer understands and how keys come out of them.
//!
//! - Shallow: `<date>/<language>/<file>` (depth 3 below the root)
//! - Deep:    `<year>/<month>/<day>/<language>/<file>` (depth 5)
//!
//! Only the trailing segments of a path are consulted; anything above them,
//! the root included, never influences the key.

use clap::ValueEnum;
use std::{borrow::Cow, fmt};

/// One fixed-depth shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Shallow,
    Deep,
}

/// Key tuple for a single matched file. Borrows from the path segments
/// except for the deep date, which has to be joined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryKey<'a> {
    pub date: Cow<'a, str>,
    pub language: &'a str,
    pub file: &'a str,
}

impl Shape {
    /// Number of trailing segments (directories + file) this shape consumes.
    pub const fn depth(self) -> usize {
        match self {
            Shape::Shallow => 3,
            Shape::Deep => 5,
        }
    }

    /// Derive the key from exactly `depth()` trailing segments, file last.
    /// Returns `None` when the arity does not fit.
    pub fn derive_key<'a>(self, segments: &[&'a str]) -> Option<EntryKey<'a>> {
        match (self, segments) {
            (Shape::Shallow, [date, language, file]) => Some(EntryKey {
                date: Cow::Borrowed(*date),
                language: *language,
                file: *file,
            }),
            (Shape::Deep, [year, month, day, language, file]) => Some(EntryKey {
                date: Cow::Owned(format!("{year}-{month}-{day}")),
                language: *language,
                file: *file,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Shallow => "shallow",
            Shape::Deep => "deep",
        })
    }
}

/// Which shapes a scan accepts. `Both` walks once and classifies each file
/// by its own depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// `<date>/<language>/<file>`
    #[default]
    Shallow,
    /// `<year>/<month>/<day>/<language>/<file>`
    Deep,
    /// Accept either shape in the same tree
    Both,
}

impl Layout {
    pub fn shapes(self) -> &'static [Shape] {
        match self {
            Layout::Shallow => &[Shape::Shallow],
            Layout::Deep => &[Shape::Deep],
            Layout::Both => &[Shape::Shallow, Shape::Deep],
        }
    }

    pub fn min_depth(self) -> usize {
        self.shapes().iter().map(|s| s.depth()).min().unwrap_or(0)
    }

    pub fn max_depth(self) -> usize {
        self.shapes().iter().map(|s| s.depth()).max().unwrap_or(0)
    }

    /// Shape a file found `depth` levels below the root belongs to, if any.
    pub fn shape_at(self, depth: usize) -> Option<Shape> {
        self.shapes().iter().copied().find(|s| s.depth() == depth)
    }
}
