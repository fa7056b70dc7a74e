use crate::error::{Error, Result};
use crate::model::{Document, Section};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// A header is a line opening with `[` and an uppercase letter. `Name[pt_BR]=`
// and brackets inside values never match.
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\[[A-Z]").expect("header pattern is valid"));

/// Parses the text of a desktop entry.
///
/// Text before the first header is ignored. A text without any header yields
/// an empty document, which is not an error.
pub fn parse(text: &str) -> Document {
    let starts: Vec<usize> = HEADER.find_iter(text).map(|m| m.start()).collect();
    let mut document = Document::new();

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        let mut lines = text[start..end].lines();

        let Some(header) = lines.next() else { continue };
        let mut section = Section::new();
        for line in lines {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                section.insert(key, value);
            }
        }
        document.insert_section(header, section);
    }

    document
}

pub fn parse_file(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text))
}
