use crate::render::{Presenter, SpeedupChart, SummaryTable};
use std::io::Write;

/// Plain-text rendering: one speedup line per input size, then an aligned table.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render_chart(&mut self, chart: &SpeedupChart) -> anyhow::Result<()> {
        writeln!(self.out, "{} ({} vs {})", chart.title, chart.y_label, chart.x_label)?;
        for series in &chart.series {
            let points: Vec<String> = series
                .points
                .iter()
                .map(|[threads, speedup]| format!("{}:{:.2}", threads, speedup))
                .collect();
            writeln!(self.out, "  {:>6}  {}", series.label, points.join(" "))?;
        }
        Ok(())
    }

    fn render_table(&mut self, table: &SummaryTable) -> anyhow::Result<()> {
        let ncols = table
            .cells
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(table.col_labels.len());

        // Repeated trials push a row past the labeled columns; those get blank headers.
        let header: Vec<&str> = (0..ncols)
            .map(|i| table.col_labels.get(i).map(String::as_str).unwrap_or(""))
            .collect();

        let label_width = table
            .row_labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0);
        let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
        for row in &table.cells {
            for (i, v) in row.iter().enumerate() {
                widths[i] = widths[i].max(v.to_string().len());
            }
        }

        write!(self.out, "{:>w$}", "", w = label_width)?;
        for (h, w) in header.iter().zip(&widths) {
            write!(self.out, "  {:>w$}", h, w = w)?;
        }
        writeln!(self.out)?;

        for (label, row) in table.row_labels.iter().zip(&table.cells) {
            write!(self.out, "{:>w$}", label, w = label_width)?;
            for (v, w) in row.iter().zip(&widths) {
                write!(self.out, "  {:>w$}", v, w = w)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}
