//! Box plot drawn from precomputed Tukey fences

use std::path::Path;

use insight_stats::TukeyFences;
use plotters::prelude::*;
use tracing::debug;

use crate::style::{axis_range, CAPTION_SIZE, CHART_SIZE, FONT};
use crate::Result;

const BOX_FILL: RGBColor = RGBColor(173, 216, 230);
const CENTER: f64 = 1.0;
const HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.15;

/// Vertical box plot of one column; outliers are drawn as red points
pub fn render(path: &Path, title: &str, column: &str, fences: &TukeyFences) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_range = axis_range(
        [fences.lower_whisker, fences.q1, fences.q3, fences.upper_whisker]
            .into_iter()
            .chain(fences.outliers.iter().copied()),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..2.0, y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(1)
        .x_label_formatter(&|_| String::new())
        .x_desc(column)
        .y_desc("value")
        .draw()?;

    let (left, right) = (CENTER - HALF_WIDTH, CENTER + HALF_WIDTH);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, fences.q1), (right, fences.q3)],
        BOX_FILL.filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(left, fences.q1), (right, fences.q3)],
        BLACK.stroke_width(1),
    )))?;

    let lines = [
        vec![(left, fences.median), (right, fences.median)],
        vec![(CENTER, fences.q3), (CENTER, fences.upper_whisker)],
        vec![(CENTER, fences.q1), (CENTER, fences.lower_whisker)],
        vec![
            (CENTER - CAP_HALF_WIDTH, fences.upper_whisker),
            (CENTER + CAP_HALF_WIDTH, fences.upper_whisker),
        ],
        vec![
            (CENTER - CAP_HALF_WIDTH, fences.lower_whisker),
            (CENTER + CAP_HALF_WIDTH, fences.lower_whisker),
        ],
    ];
    chart.draw_series(
        lines
            .into_iter()
            .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
    )?;

    chart.draw_series(
        fences
            .outliers
            .iter()
            .map(|&v| Circle::new((CENTER, v), 4, RED.filled())),
    )?;

    root.present()?;
    debug!(path = %path.display(), outliers = fences.outlier_count(), "box plot written");
    Ok(())
}
