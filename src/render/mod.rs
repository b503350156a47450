//! Presentation of a finished `Report`: a speedup chart and a summary table.
//!
//! `present` turns the report into back-end neutral structures and hands them to a
//! `Presenter`. Back ends:
//! - `html`: self-contained page (SVG chart + table), written to disk
//! - `text`: aligned terminal output

pub mod html;
pub mod text;

pub use html::HtmlPresenter;
pub use text::TextPresenter;

use crate::config::{ThreadCount, Timing};
use crate::model::Report;
use serde::Serialize;

/// Marker cycle for per-size series: circle, triangle, square, pentagon, star, hexagon.
pub const MARKERS: [char; 6] = ['o', '^', 's', 'p', '*', 'h'];

pub trait Presenter {
    fn render_chart(&mut self, chart: &SpeedupChart) -> anyhow::Result<()>;
    fn render_table(&mut self, table: &SummaryTable) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub marker: char,
    /// (threads, speedup)
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_ticks: Vec<ThreadCount>,
    pub x_max: f64,
    pub y_max: f64,
    /// Dashed reference: speedup equal to thread count.
    pub ideal: Vec<[f64; 2]>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<Timing>>,
}

impl SpeedupChart {
    pub fn from_report(report: &Report) -> Self {
        let max_threads = report.thread_counts.iter().copied().max().unwrap_or(1) as f64;
        // Leave one tick step of room past the last thread count.
        let step = max_threads / report.thread_counts.len().max(1) as f64;
        let x_max = max_threads + step;

        let series: Vec<ChartSeries> = report
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| ChartSeries {
                label: format!("{}M", s.size),
                marker: MARKERS[i % MARKERS.len()],
                points: s
                    .points
                    .iter()
                    .map(|p| [p.threads as f64, p.speedup])
                    .collect(),
            })
            .collect();

        let top = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p[1]))
            .fold(0.0f64, f64::max);

        Self {
            title: report.title.clone(),
            x_label: "Number of threads".to_string(),
            y_label: "Speedup".to_string(),
            x_ticks: report.thread_counts.clone(),
            x_max,
            y_max: top.ceil() + 1.0,
            ideal: vec![[0.0, 0.0], [max_threads, max_threads]],
            series,
        }
    }
}

impl SummaryTable {
    pub fn from_report(report: &Report) -> Self {
        let col_labels = std::iter::once(1)
            .chain(report.thread_counts.iter().copied())
            .map(|c| c.to_string())
            .collect();
        Self {
            row_labels: report.rows.iter().map(|r| r.size.to_string()).collect(),
            col_labels,
            cells: report.rows.iter().map(|r| r.values.clone()).collect(),
        }
    }
}

/// Drive `presenter` with the chart first, then the table.
pub fn present(report: &Report, presenter: &mut dyn Presenter) -> anyhow::Result<()> {
    presenter.render_chart(&SpeedupChart::from_report(report))?;
    presenter.render_table(&SummaryTable::from_report(report))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaselineMatch, SpeedupPoint, SpeedupSeries, SummaryRow};
    use pretty_assertions::assert_eq;

    fn report() -> Report {
        Report {
            title: "Speedup of PSRS".to_string(),
            baseline_match: BaselineMatch::ByName,
            thread_counts: vec![2, 4],
            rows: vec![
                SummaryRow {
                    size: 32,
                    values: vec![100, 50, 40],
                },
                SummaryRow {
                    size: 64,
                    values: vec![200, 40, 25],
                },
            ],
            series: vec![
                SpeedupSeries {
                    size: 32,
                    points: vec![
                        SpeedupPoint {
                            threads: 2,
                            speedup: 2.0,
                        },
                        SpeedupPoint {
                            threads: 4,
                            speedup: 2.5,
                        },
                    ],
                },
                SpeedupSeries {
                    size: 64,
                    points: vec![
                        SpeedupPoint {
                            threads: 2,
                            speedup: 5.0,
                        },
                        SpeedupPoint {
                            threads: 4,
                            speedup: 8.0,
                        },
                    ],
                },
            ],
        }
    }

    #[derive(Default)]
    struct Recording {
        calls: Vec<&'static str>,
        chart: Option<SpeedupChart>,
        table: Option<SummaryTable>,
    }

    impl Presenter for Recording {
        fn render_chart(&mut self, chart: &SpeedupChart) -> anyhow::Result<()> {
            self.calls.push("chart");
            self.chart = Some(chart.clone());
            Ok(())
        }

        fn render_table(&mut self, table: &SummaryTable) -> anyhow::Result<()> {
            self.calls.push("table");
            self.table = Some(table.clone());
            Ok(())
        }
    }

    #[test]
    fn presents_chart_then_table() {
        let mut rec = Recording::default();
        present(&report(), &mut rec).unwrap();
        assert_eq!(rec.calls, vec!["chart", "table"]);
        assert_eq!(rec.chart.unwrap().title, "Speedup of PSRS");

        let table = rec.table.unwrap();
        assert_eq!(table.row_labels, vec!["32", "64"]);
        assert_eq!(table.col_labels, vec!["1", "2", "4"]);
        assert_eq!(table.cells, vec![vec![100, 50, 40], vec![200, 40, 25]]);
    }

    #[test]
    fn chart_has_one_labeled_series_per_size() {
        let chart = SpeedupChart::from_report(&report());

        assert_eq!(chart.ideal, vec![[0.0, 0.0], [4.0, 4.0]]);
        assert_eq!(chart.x_ticks, vec![2, 4]);
        assert_eq!(chart.x_max, 6.0);
        assert_eq!(chart.y_max, 9.0);

        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["32M", "64M"]);
        assert_eq!(chart.series[0].marker, 'o');
        assert_eq!(chart.series[1].marker, '^');
        assert_eq!(chart.series[1].points, vec![[2.0, 5.0], [4.0, 8.0]]);
    }

    #[test]
    fn reference_axes_match_driver_layout() {
        let mut r = report();
        r.thread_counts = (1..=10).map(|i| i * 2).collect();
        let chart = SpeedupChart::from_report(&r);
        assert_eq!(chart.x_max, 22.0);
        assert_eq!(chart.ideal[1], [20.0, 20.0]);
    }
}
