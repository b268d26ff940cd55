//! Delimited-text loading
//!
//! Reads a file, detects its character encoding (best effort), sniffs the
//! field delimiter and builds a [`Dataset`] with inferred column types.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::{debug, info, instrument};

use crate::{Column, Dataset, Error, Result};

/// Cell contents treated as missing values
pub const NULL_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

const DELIMITER_CANDIDATES: &[u8] = &[b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

/// Options for [`load_with`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Field delimiter; sniffed from the content when `None`
    pub delimiter: Option<u8>,
}

/// Load a delimited file with default options
pub fn load(path: &Path) -> Result<Dataset> {
    load_with(path, LoadOptions::default())
}

/// Load a delimited file
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_with(path: &Path, options: LoadOptions) -> Result<Dataset> {
    let bytes = std::fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    debug!(encoding = encoding.name(), bytes = bytes.len(), "decoding input");

    let (content, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        debug!("input contained sequences invalid for {}", encoding.name());
    }

    let delimiter = options.delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    let dataset = parse(&dataset_name(path), &content, delimiter)?;

    info!(
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        "loaded dataset {}",
        dataset.name()
    );
    Ok(dataset)
}

/// Guess the text encoding of raw bytes
///
/// A byte order mark decides outright; otherwise valid UTF-8 is taken as
/// UTF-8 and anything else falls back to Windows-1252.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        WINDOWS_1252
    }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample_lines: Vec<&str> = content.lines().take(SNIFF_LINES).collect();

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Parse decoded text into a dataset
///
/// The first record is the header. Short rows are padded with missing
/// values; rows longer than the header are rejected.
pub fn parse(name: &str, content: &str, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = normalize_headers(reader.headers()?.iter());
    if headers.is_empty() || (headers.len() == 1 && content.trim().is_empty()) {
        return Err(Error::EmptyDataset(format!("{name} has no header row")));
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            // Quoted fields may span lines, so the record index is not the line
            let line = record.position().map_or(index as u64 + 2, |p| p.line());
            return Err(Error::Malformed(format!(
                "line {line}: expected {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
        for (column, slot) in cells.iter_mut().enumerate() {
            slot.push(record.get(column).and_then(normalize_cell));
        }
    }

    if cells[0].is_empty() {
        return Err(Error::EmptyDataset(format!("{name} has no data rows")));
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(header, raw)| Column::infer(header, raw))
        .collect();
    Dataset::new(name, columns)
}

fn normalize_cell(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if NULL_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(field.to_string())
    }
}

fn normalize_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (index, header) in raw.enumerate() {
        let header = header.trim().trim_start_matches('\u{feff}');
        let base = if header.is_empty() {
            format!("Unnamed: {index}")
        } else {
            header.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// Dataset name derived from a path: the file stem
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}
