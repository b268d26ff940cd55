//! SVG charts for insight analyses
//!
//! Each renderer writes one self-contained SVG file. File names come from
//! [`artifact_file_name`], which is stable for a given analysis and its
//! arguments.

pub mod boxplot;
pub mod error;
pub mod heatmap;
pub mod naming;
pub mod scatter;
pub mod style;

pub use error::{Error, Result};
pub use naming::{artifact_file_name, CHART_EXTENSION};
pub use scatter::Axes;
