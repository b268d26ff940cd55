//! Deterministic artifact file names
//!
//! A chart is named after the analysis that produced it and its arguments:
//! `<analysis>_<slug>_<hash>.svg`. The hash covers the unslugged arguments,
//! so column names that slug identically still get distinct files.

use sha2::{Digest, Sha256};

/// File extension of every rendered chart
pub const CHART_EXTENSION: &str = "svg";

const MAX_SLUG_LEN: usize = 40;
const HASH_LEN: usize = 8;

/// File name for the chart of `analysis` over `args`
pub fn artifact_file_name(analysis: &str, args: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(analysis.as_bytes());
    for arg in args {
        hasher.update([0u8]);
        hasher.update(arg.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    let hash = &digest[..HASH_LEN];

    let slug = slugify(&args.join("_"));
    if slug.is_empty() {
        format!("{analysis}_{hash}.{CHART_EXTENSION}")
    } else {
        format!("{analysis}_{slug}_{hash}.{CHART_EXTENSION}")
    }
}

/// Lowercase ASCII alphanumerics with single underscores between runs
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    slug.trim_end_matches('_').to_string()
}
