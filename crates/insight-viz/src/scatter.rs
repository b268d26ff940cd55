//! Scatter plots for paired columns and clustered points

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::style::{axis_range, cluster_color, CAPTION_SIZE, CHART_SIZE, FONT, POINT_COLOR};
use crate::{Error, Result};

/// Axis descriptions for a two-column chart
#[derive(Debug, Clone, Copy)]
pub struct Axes<'a> {
    pub x: &'a str,
    pub y: &'a str,
}

/// Scatter plot of `points` with a single color
pub fn render(path: &Path, title: &str, axes: Axes<'_>, points: &[(f64, f64)]) -> Result<()> {
    draw(path, title, axes, points, None)
}

/// Scatter plot of `points` colored by cluster label
pub fn render_clusters(
    path: &Path,
    title: &str,
    axes: Axes<'_>,
    points: &[(f64, f64)],
    labels: &[usize],
) -> Result<()> {
    if labels.len() != points.len() {
        return Err(Error::InvalidInput(format!(
            "{} labels for {} points",
            labels.len(),
            points.len()
        )));
    }
    draw(path, title, axes, points, Some(labels))
}

fn draw(
    path: &Path,
    title: &str,
    axes: Axes<'_>,
    points: &[(f64, f64)],
    labels: Option<&[usize]>,
) -> Result<()> {
    if points.is_empty() {
        return Err(Error::InvalidInput("no points to plot".to_string()));
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            axis_range(points.iter().map(|p| p.0)),
            axis_range(points.iter().map(|p| p.1)),
        )?;

    chart
        .configure_mesh()
        .x_desc(axes.x)
        .y_desc(axes.y)
        .draw()?;

    match labels {
        None => {
            chart.draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, 3, POINT_COLOR.mix(0.7).filled())),
            )?;
        }
        Some(labels) => {
            let clusters = labels.iter().max().map_or(0, |&m| m + 1);
            for cluster in 0..clusters {
                let color = cluster_color(cluster);
                chart
                    .draw_series(
                        points
                            .iter()
                            .zip(labels)
                            .filter(|(_, label)| **label == cluster)
                            .map(|(&p, _)| Circle::new(p, 4, color.filled())),
                    )?
                    .label(format!("cluster {cluster}"))
                    .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
            }
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
    }

    root.present()?;
    debug!(path = %path.display(), points = points.len(), "scatter plot written");
    Ok(())
}
