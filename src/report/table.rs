//! Summary statistics table: data model and PNG rendering

use super::{render_err, FONT_FAMILY};
use crate::error::{AppError, Result};
use crate::models::TestCaseSummary;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const TABLE_TITLE: &str = "Performance Summary Statistics";

pub const TABLE_HEADER: [&str; 5] = ["Test Case", "Avg (ms)", "Min (ms)", "Max (ms)", "Median (ms)"];

/// Relative column widths, summing to 1
const COLUMN_WIDTHS: [f64; 5] = [0.4, 0.15, 0.15, 0.15, 0.15];

pub const HEADER_FILL: RGBColor = RGBColor(0x44, 0x72, 0xC4);

const TABLE_WIDTH: u32 = 1500;
const ROW_HEIGHT: u32 = 64;
const TITLE_HEIGHT: u32 = 110;
const MARGIN: u32 = 40;
const CELL_PADDING: i32 = 14;

/// Header plus one row per test case, every number with two decimals
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn from_summaries(summaries: &[TestCaseSummary]) -> Self {
        let rows = summaries
            .iter()
            .map(|s| {
                vec![
                    s.display_name(),
                    format!("{:.2}", s.avg),
                    format!("{:.2}", s.min),
                    format!("{:.2}", s.max),
                    format!("{:.2}", s.median),
                ]
            })
            .collect();

        Self {
            header: TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Row for the test case with this display name
    pub fn row(&self, display_name: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(display_name))
            .map(Vec::as_slice)
    }

    /// Column-aligned plain text rendering for the console
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, width))| {
                    if i == 0 {
                        format!("{:<width$}", cell, width = width)
                    } else {
                        format!("{:>width$}", cell, width = width)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let separator = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");
        let mut lines = vec![format_row(&self.header), separator];
        lines.extend(self.rows.iter().map(|row| format_row(row)));
        lines.join("\n")
    }
}

/// Draw the table into a PNG at `path`
pub fn render_summary_table(table: &SummaryTable, path: &Path) -> Result<()> {
    if table.rows.is_empty() {
        return Err(AppError::render("No test cases to tabulate"));
    }

    let row_count = table.rows.len() as u32 + 1;
    let height = TITLE_HEIGHT + row_count * ROW_HEIGHT + MARGIN;
    let root = BitMapBackend::new(path, (TABLE_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let title_style = TextStyle::from((FONT_FAMILY, 40).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        TABLE_TITLE.to_string(),
        ((TABLE_WIDTH / 2) as i32, (TITLE_HEIGHT / 2) as i32),
        title_style,
    ))
    .map_err(render_err)?;

    let table_width = f64::from(TABLE_WIDTH - 2 * MARGIN);
    let mut column_edges = vec![MARGIN as i32];
    let mut acc = f64::from(MARGIN);
    for width in COLUMN_WIDTHS {
        acc += width * table_width;
        column_edges.push(acc.round() as i32);
    }

    let header_text = TextStyle::from((FONT_FAMILY, 26).into_font().style(FontStyle::Bold))
        .color(&WHITE)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let body_text = TextStyle::from((FONT_FAMILY, 26).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let border = ShapeStyle::from(&BLACK.mix(0.6)).stroke_width(1);

    let all_rows = std::iter::once(&table.header).chain(table.rows.iter());
    for (row_index, row) in all_rows.enumerate() {
        let top = (TITLE_HEIGHT + row_index as u32 * ROW_HEIGHT) as i32;
        let bottom = top + ROW_HEIGHT as i32;
        let is_header = row_index == 0;

        for (col, cell) in row.iter().enumerate().take(COLUMN_WIDTHS.len()) {
            let left = column_edges[col];
            let right = column_edges[col + 1];
            let fill = if is_header { HEADER_FILL.filled() } else { WHITE.filled() };

            root.draw(&Rectangle::new([(left, top), (right, bottom)], fill))
                .map_err(render_err)?;
            root.draw(&Rectangle::new([(left, top), (right, bottom)], border))
                .map_err(render_err)?;

            let style = if is_header { header_text.clone() } else { body_text.clone() };
            root.draw(&Text::new(
                cell.clone(),
                (left + CELL_PADDING, (top + bottom) / 2),
                style,
            ))
            .map_err(render_err)?;
        }
    }

    root.present().map_err(render_err)?;
    Ok(())
}
