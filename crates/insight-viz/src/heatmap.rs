//! Annotated correlation heatmap
//!
//! Cells are laid out in pixel coordinates on the drawing area, one square
//! per column pair, colored on a diverging scale and labelled with the
//! coefficient to two decimals.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::style::{coolwarm, CAPTION_SIZE, CHART_SIZE, FONT};
use crate::{Error, Result};

const LABEL_MARGIN: i32 = 130;
const EDGE_MARGIN: i32 = 20;
const MAX_LABEL_CHARS: usize = 14;

/// Render a square matrix of coefficients with row and column labels
pub fn render(path: &Path, title: &str, columns: &[String], matrix: &[Vec<f64>]) -> Result<()> {
    let k = columns.len();
    if k == 0 {
        return Err(Error::InvalidInput("no columns to plot".to_string()));
    }
    if matrix.len() != k || matrix.iter().any(|row| row.len() != k) {
        return Err(Error::InvalidInput(format!("matrix is not {k}x{k}")));
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(title, (FONT, CAPTION_SIZE))?;

    let (width, height) = area.dim_in_pixel();
    let available = (width as i32 - LABEL_MARGIN - EDGE_MARGIN)
        .min(height as i32 - LABEL_MARGIN / 2 - EDGE_MARGIN);
    let cell = (available / k as i32).max(1);
    let left = LABEL_MARGIN;
    let top = LABEL_MARGIN / 2;

    let label_style = TextStyle::from((FONT, 14).into_font()).color(&BLACK);
    let row_label = label_style.pos(Pos::new(HPos::Right, VPos::Center));
    let column_label = label_style.pos(Pos::new(HPos::Center, VPos::Bottom));
    let value_style = |v: f64| {
        let color = if v.is_finite() && v.abs() > 0.6 { &WHITE } else { &BLACK };
        TextStyle::from((FONT, 13).into_font())
            .color(color)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    for (i, name) in columns.iter().enumerate() {
        let offset = i as i32 * cell + cell / 2;
        area.draw(&Text::new(short_label(name), (left - 8, top + offset), row_label.clone()))?;
        area.draw(&Text::new(short_label(name), (left + offset, top - 8), column_label.clone()))?;
    }

    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let x0 = left + j as i32 * cell;
            let y0 = top + i as i32 * cell;
            let corners = [(x0, y0), (x0 + cell, y0 + cell)];

            area.draw(&Rectangle::new(corners, coolwarm(value).filled()))?;
            area.draw(&Rectangle::new(corners, WHITE.stroke_width(1)))?;
            area.draw(&Text::new(
                annotation(value),
                (x0 + cell / 2, y0 + cell / 2),
                value_style(value),
            ))?;
        }
    }

    root.present()?;
    debug!(path = %path.display(), columns = k, "heatmap written");
    Ok(())
}

fn annotation(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "n/a".to_string()
    }
}

fn short_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{head}…")
    }
}
