// indexer/src/index.rs
//! The date -> language -> files index.
//!
//! Both map levels and the file lists keep insertion order, which is the
//! scan's discovery order. Serialization walks the same order, so the JSON
//! object keys come out exactly as they were first seen.

use serde::{
    ser::SerializeMap,
    Serialize,
    Serializer
};
use serde_json::ser::PrettyFormatter;
use std::{
    collections::HashMap,
    io::{self, Write}
};
use crate::error::{
    IndexError,
    Result
};

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Default)]
pub struct Index {
    dates: Vec<DateGroup>,
    // date key -> slot in `dates`
    positions: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    date: String,
    languages: Vec<LanguageGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGroup {
    language: String,
    files: Vec<String>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` under (`date`, `language`). Containers are created on
    /// first reference and reused afterwards; duplicates are kept.
    pub fn insert(&mut self, date: impl Into<String>, language: impl Into<String>, file: impl Into<String>) {
        let date = date.into();
        let slot = if let Some(&i) = self.positions.get(&date) {
            i
        } else {
            let i = self.dates.len();
            self.positions.insert(date.clone(), i);
            self.dates.push(DateGroup { date, languages: Vec::new() });
            i
        };
        self.dates[slot].push(language.into(), file.into());
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Distinct (date, language) pairs.
    pub fn language_count(&self) -> usize {
        self.dates.iter().map(|d| d.languages.len()).sum()
    }

    pub fn file_count(&self) -> usize {
        self.dates
            .iter()
            .flat_map(|d| d.languages.iter())
            .map(|l| l.files.len())
            .sum()
    }

    pub fn get_date(&self, date: &str) -> Option<&DateGroup> {
        self.positions.get(date).map(|&i| &self.dates[i])
    }

    pub fn get(&self, date: &str, language: &str) -> Option<&[String]> {
        self.get_date(date)?.get(language)
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateGroup> {
        self.dates.iter()
    }

    /// Lexicographic order at every level. Discovery order is lost.
    pub fn sort(&mut self) {
        self.dates.sort_by(|a, b| a.date.cmp(&b.date));
        for d in &mut self.dates {
            d.languages.sort_by(|a, b| a.language.cmp(&b.language));
            for l in &mut d.languages {
                l.files.sort();
            }
        }
        self.positions = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, d)| (d.date.clone(), i))
            .collect();
    }

    /// Pretty JSON with 4-space indentation. No trailing newline.
    pub fn write_pretty<W: Write>(&self, writer: W) -> Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_pretty(&mut buf)?;
        String::from_utf8(buf).map_err(|e| IndexError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

// Equality is about content and order, not the lookup table.
impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.dates == other.dates
    }
}

impl Eq for Index {}

impl DateGroup {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn languages(&self) -> impl Iterator<Item = &LanguageGroup> {
        self.languages.iter()
    }

    pub fn get(&self, language: &str) -> Option<&[String]> {
        self.languages
            .iter()
            .find(|l| l.language == language)
            .map(|l| l.files.as_slice())
    }

    fn push(&mut self, language: String, file: String) {
        match self.languages.iter_mut().find(|l| l.language == language) {
            Some(group) => group.files.push(file),
            None => self.languages.push(LanguageGroup { language, files: vec![file] }),
        }
    }
}

impl LanguageGroup {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.dates.len()))?;
        for d in &self.dates {
            map.serialize_entry(&d.date, d)?;
        }
        map.end()
    }
}

impl Serialize for DateGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.languages.len()))?;
        for l in &self.languages {
            map.serialize_entry(&l.language, &l.files)?;
        }
        map.end()
    }
}
