//! Latency distribution chart, one box per test case

use super::{render_err, FONT_FAMILY};
use crate::error::{AppError, Result};
use crate::models::TestCaseSummary;
use crate::stats::BoxPlotStats;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const BOXPLOT_TITLE: &str = "API Performance - Latency Distribution for Each Test Case";

/// Box fill colors, cycled when there are more cases than colors
pub const BOX_COLORS: [RGBColor; 4] = [
    RGBColor(0xff, 0x99, 0x99),
    RGBColor(0xff, 0x66, 0x66),
    RGBColor(0x99, 0xcc, 0xff),
    RGBColor(0x66, 0x99, 0xff),
];

const MEDIAN_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
const CHART_SIZE: (u32, u32) = (1800, 900);
const BOX_HALF_WIDTH: f64 = 0.25;
const CAP_HALF_WIDTH: f64 = 0.12;
const OUTLIER_RADIUS: i32 = 5;

/// One box ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyBox {
    pub label: String,
    pub stats: BoxPlotStats,
    pub color: RGBColor,
}

/// Compute the boxes for every summary, in order
pub fn build_boxes(summaries: &[TestCaseSummary]) -> Result<Vec<LatencyBox>> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            Ok(LatencyBox {
                label: summary.display_name(),
                stats: BoxPlotStats::from_latencies(&summary.latencies)?,
                color: box_color(i),
            })
        })
        .collect()
}

pub fn box_color(index: usize) -> RGBColor {
    BOX_COLORS[index % BOX_COLORS.len()]
}

/// Y range covering every whisker and outlier with 5% headroom
pub fn y_range(boxes: &[LatencyBox]) -> (f64, f64) {
    let low = boxes.iter().map(|b| b.stats.lowest()).fold(f64::INFINITY, f64::min);
    let high = boxes.iter().map(|b| b.stats.highest()).fold(f64::NEG_INFINITY, f64::max);

    let span = high - low;
    let pad = if span > 0.0 { span * 0.05 } else { high.abs().max(1.0) * 0.05 };
    ((low - pad).max(0.0), high + pad)
}

/// Draw the chart into a PNG at `path`
pub fn render_boxplot(summaries: &[TestCaseSummary], path: &Path) -> Result<()> {
    let boxes = build_boxes(summaries)?;
    if boxes.is_empty() {
        return Err(AppError::render("No test cases to plot"));
    }

    let (y_min, y_max) = y_range(&boxes);
    let x_max = boxes.len() as f64;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(BOXPLOT_TITLE, (FONT_FAMILY, 40).into_font().style(FontStyle::Bold))
        .margin(30)
        .x_label_area_size(110)
        .y_label_area_size(120)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;

    // Category names are drawn under each box below; numeric x labels stay blank.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .light_line_style(WHITE.stroke_width(1))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Test Case")
        .y_desc("Latency (ms)")
        .axis_desc_style((FONT_FAMILY, 30))
        .label_style((FONT_FAMILY, 22))
        .draw()
        .map_err(render_err)?;

    let outline = BLACK.stroke_width(2);

    for (i, latency_box) in boxes.iter().enumerate() {
        let center = i as f64 + 0.5;
        let left = center - BOX_HALF_WIDTH;
        let right = center + BOX_HALF_WIDTH;
        let s = &latency_box.stats;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(left, s.q1), (right, s.q3)],
                latency_box.color.filled(),
            )))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(left, s.q1), (right, s.q3)],
                outline,
            )))
            .map_err(render_err)?;

        let whisker_segments = vec![
            vec![(center, s.whisker_low), (center, s.q1)],
            vec![(center, s.q3), (center, s.whisker_high)],
            vec![(center - CAP_HALF_WIDTH, s.whisker_low), (center + CAP_HALF_WIDTH, s.whisker_low)],
            vec![(center - CAP_HALF_WIDTH, s.whisker_high), (center + CAP_HALF_WIDTH, s.whisker_high)],
        ];
        chart
            .draw_series(whisker_segments.into_iter().map(|points| PathElement::new(points, outline)))
            .map_err(render_err)?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(left, s.median), (right, s.median)],
                MEDIAN_COLOR.stroke_width(3),
            )))
            .map_err(render_err)?;

        chart
            .draw_series(
                s.outliers
                    .iter()
                    .map(|&v| Circle::new((center, v), OUTLIER_RADIUS, BLACK.stroke_width(1))),
            )
            .map_err(render_err)?;
    }

    let label_style = TextStyle::from((FONT_FAMILY, 24).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, latency_box) in boxes.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64 + 0.5, y_min));
        root.draw(&Text::new(latency_box.label.clone(), (x, y + 12), label_style.clone()))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_cycle() {
        assert_eq!(box_color(0), RGBColor(0xff, 0x99, 0x99));
        assert_eq!(box_color(3), RGBColor(0x66, 0x99, 0xff));
        assert_eq!(box_color(4), box_color(0));
    }

    #[test]
    fn test_build_boxes_keeps_order_and_names() {
        let summaries = vec![
            TestCaseSummary::from_latencies("fake_news_1", vec![1.0, 2.0, 3.0]).unwrap(),
            TestCaseSummary::from_latencies("real_news_1", vec![4.0, 5.0, 6.0]).unwrap(),
        ];
        let boxes = build_boxes(&summaries).unwrap();

        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].label, "Fake News 1");
        assert_eq!(boxes[1].label, "Real News 1");
        assert_eq!(boxes[1].stats.median, 5.0);
        assert_eq!(boxes[1].color, BOX_COLORS[1]);
    }

    #[test]
    fn test_y_range_covers_outliers() {
        let mut latencies: Vec<f64> = (10..=19).map(f64::from).collect();
        latencies.push(500.0);
        let summaries = vec![TestCaseSummary::from_latencies("a", latencies).unwrap()];
        let (low, high) = y_range(&build_boxes(&summaries).unwrap());

        assert!(low <= 10.0);
        assert!(low >= 0.0);
        assert!(high > 500.0);
    }

    #[test]
    fn test_y_range_for_flat_zero_series() {
        let summaries = vec![TestCaseSummary::from_latencies("a", vec![0.0, 0.0]).unwrap()];
        let (low, high) = y_range(&build_boxes(&summaries).unwrap());
        assert_eq!(low, 0.0);
        assert!(high > 0.0);
    }

    #[test]
    fn test_render_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_boxplot(&[], &dir.path().join("b.png")).unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
