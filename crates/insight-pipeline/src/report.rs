//! Report assembly
//!
//! The report is a Markdown document: the narrative, then a
//! `## Visualizations` section with one image reference per chart.

use std::fs;
use std::path::{Path, PathBuf};

use insight_core::ChartArtifact;
use tracing::info;

use crate::config::REPORT_FILE_NAME;

/// Narrative placeholder used when the model could not write one
pub fn degraded_narrative(dataset_name: &str, reason: &str) -> String {
    format!("# {dataset_name}\n\n_The narrative could not be generated ({reason}). The charts below were produced anyway._")
}

/// Reference to `artifact`, relative to `base` when it lives below it
fn chart_link(artifact: &ChartArtifact, base: &Path) -> String {
    let relative = artifact.path.strip_prefix(base).unwrap_or(&artifact.path);
    let target = relative.to_string_lossy().replace('\\', "/");
    let alt = artifact.title.replace(['[', ']'], "");
    if target.contains(' ') {
        format!("![{alt}](<{target}>)")
    } else {
        format!("![{alt}]({target})")
    }
}

/// Render the report text
pub fn compose(narrative: &str, artifacts: &[&ChartArtifact], base: &Path) -> String {
    let mut out = String::new();
    out.push_str(narrative.trim_end());
    out.push_str("\n\n## Visualizations\n\n");
    for artifact in artifacts {
        out.push_str(&chart_link(artifact, base));
        out.push('\n');
    }
    out
}

/// Write the report into `output_dir`, replacing any previous one
pub fn write_report(
    output_dir: &Path,
    narrative: &str,
    artifacts: &[&ChartArtifact],
) -> std::io::Result<PathBuf> {
    let path = output_dir.join(REPORT_FILE_NAME);
    fs::write(&path, compose(narrative, artifacts, output_dir))?;
    info!(path = %path.display(), charts = artifacts.len(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compose_orders_charts() {
        let base = Path::new("/out/people");
        let a = ChartArtifact::new(base.join("correlation_matrix_1234abcd.svg"), "Correlation matrix");
        let b = ChartArtifact::new(base.join("correlation_age_income_deadbeef.svg"), "age vs income");

        let text = compose("# People\n\nStory.\n", &[&a, &b], base);

        assert_eq!(
            text,
            "# People\n\nStory.\n\n## Visualizations\n\n\
             ![Correlation matrix](correlation_matrix_1234abcd.svg)\n\
             ![age vs income](correlation_age_income_deadbeef.svg)\n"
        );
    }

    #[test]
    fn test_chart_link_outside_base() {
        let artifact = ChartArtifact::new("/elsewhere/chart one.svg", "[odd] title");
        assert_eq!(
            chart_link(&artifact, Path::new("/out")),
            "![odd title](</elsewhere/chart one.svg>)"
        );
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = write_report(dir.path(), "first", &[]).unwrap();
        write_report(dir.path(), "second", &[]).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("second"));
        assert!(!text.contains("first"));
    }

    #[test]
    fn test_write_report_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(write_report(&dir.path().join("missing"), "text", &[]).is_err());
    }

    #[test]
    fn test_degraded_narrative() {
        let text = degraded_narrative("people", "API error (500): boom");
        assert!(text.starts_with("# people\n"));
        assert!(text.contains("API error (500): boom"));
    }
}
