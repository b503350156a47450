use crate::render::{Presenter, SpeedupChart, SummaryTable};
use anyhow::{Context, bail};
use log::info;
use serde::Serialize;
use std::fs;

/// Collects the chart and table, then writes them out as one HTML page.
#[derive(Debug, Default)]
pub struct HtmlPresenter {
    chart: Option<SpeedupChart>,
    table: Option<SummaryTable>,
}

#[derive(Serialize)]
struct PageData<'a> {
    chart: &'a SpeedupChart,
    table: &'a SummaryTable,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let (Some(chart), Some(table)) = (&self.chart, &self.table) else {
            bail!("html report needs both a chart and a table");
        };
        render_html_report(chart, table)
    }

    pub fn write_to(&self, path: &str) -> anyhow::Result<()> {
        let html = self.to_html()?;
        fs::write(path, html).with_context(|| format!("write html report {}", path))?;
        info!("wrote {}", path);
        Ok(())
    }
}

impl Presenter for HtmlPresenter {
    fn render_chart(&mut self, chart: &SpeedupChart) -> anyhow::Result<()> {
        self.chart = Some(chart.clone());
        Ok(())
    }

    fn render_table(&mut self, table: &SummaryTable) -> anyhow::Result<()> {
        self.table = Some(table.clone());
        Ok(())
    }
}

/// Render a self-contained HTML report (data embedded as JSON).
///
/// The template is filled with `replace` rather than `format!()` because the
/// embedded JS is full of `{}` and `${x}`.
pub fn render_html_report(chart: &SpeedupChart, table: &SummaryTable) -> anyhow::Result<String> {
    let json = serde_json::to_string(&PageData { chart, table })?;
    // Keep a title like "</script>" from closing the data block.
    let json = json.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Speedup report</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .container { display: flex; flex-wrap: wrap; gap: 24px; padding: 16px; }
  .panel { border: 1px solid #ddd; border-radius: 6px; padding: 12px; }

  svg text { font-size: 12px; fill: #333; }
  .axis { stroke: #333; stroke-width: 1; }
  .grid { stroke: #eee; stroke-width: 1; }
  .ideal { stroke: #4d4d4d; stroke-dasharray: 6 4; fill: none; }
  .series { fill: none; stroke-width: 1.5; }

  table { border-collapse: collapse; margin-top: 8px; }
  th, td { border: 1px solid #ddd; padding: 6px 8px; font-size: 14px; }
  th { background: #fafafa; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
</style>
</head>
<body>
<header>
  <h2 id="title" style="margin: 0;"></h2>
</header>

<div class="container">
  <div class="panel"><svg id="chart" width="600" height="600"></svg></div>
  <div class="panel">
    <table id="summary">
      <thead id="summaryHead"></thead>
      <tbody id="summaryBody"></tbody>
    </table>
  </div>
</div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const COLORS = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2"];
const SVG_NS = "http://www.w3.org/2000/svg";

function el(name, attrs, parent) {
  const e = document.createElementNS(SVG_NS, name);
  for (const [k, v] of Object.entries(attrs)) e.setAttribute(k, v);
  if (parent) parent.appendChild(e);
  return e;
}

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function polygon(n, x, y, r, inner) {
  const pts = [];
  const steps = inner ? n * 2 : n;
  for (let i = 0; i < steps; i++) {
    const rr = inner && i % 2 ? inner : r;
    const a = -Math.PI / 2 + (i * 2 * Math.PI) / steps;
    pts.push(`${x + rr * Math.cos(a)},${y + rr * Math.sin(a)}`);
  }
  return pts.join(" ");
}

function marker(kind, x, y, color, parent) {
  const r = 4;
  const style = { fill: color, stroke: color };
  switch (kind) {
    case "o": return el("circle", { cx: x, cy: y, r, ...style }, parent);
    case "s": return el("rect", { x: x - r, y: y - r, width: 2 * r, height: 2 * r, ...style }, parent);
    case "^": return el("polygon", { points: polygon(3, x, y, r + 1), ...style }, parent);
    case "p": return el("polygon", { points: polygon(5, x, y, r + 1), ...style }, parent);
    case "h": return el("polygon", { points: polygon(6, x, y, r + 1), ...style }, parent);
    case "*": return el("polygon", { points: polygon(5, x, y, r + 2, r / 2), ...style }, parent);
    default: return el("circle", { cx: x, cy: y, r, ...style }, parent);
  }
}

function renderChart() {
  const c = DATA.chart;
  const svg = document.getElementById("chart");
  const W = +svg.getAttribute("width"), H = +svg.getAttribute("height");
  const m = { left: 50, right: 16, top: 30, bottom: 46 };
  const sx = (v) => m.left + (v / c.x_max) * (W - m.left - m.right);
  const sy = (v) => H - m.bottom - (v / c.y_max) * (H - m.top - m.bottom);

  const defs = el("defs", {}, svg);
  const clip = el("clipPath", { id: "plot" }, defs);
  el("rect", { x: m.left, y: m.top, width: W - m.left - m.right, height: H - m.top - m.bottom }, clip);

  for (let y = 0; y <= c.y_max; y += 1) {
    el("line", { x1: sx(0), x2: sx(c.x_max), y1: sy(y), y2: sy(y), class: "grid" }, svg);
    el("text", { x: m.left - 8, y: sy(y) + 4, "text-anchor": "end" }, svg).textContent = y;
  }
  for (const t of c.x_ticks) {
    el("text", { x: sx(t), y: H - m.bottom + 16, "text-anchor": "middle" }, svg).textContent = t;
  }
  el("line", { x1: sx(0), x2: sx(c.x_max), y1: sy(0), y2: sy(0), class: "axis" }, svg);
  el("line", { x1: sx(0), x2: sx(0), y1: sy(0), y2: sy(c.y_max), class: "axis" }, svg);
  el("text", { x: (W + m.left) / 2, y: H - 8, "text-anchor": "middle" }, svg).textContent = c.x_label;
  el("text", { x: 14, y: H / 2, transform: `rotate(-90 14 ${H / 2})`, "text-anchor": "middle" }, svg).textContent = c.y_label;
  el("text", { x: W / 2, y: 18, "text-anchor": "middle" }, svg).textContent = c.title;

  const plot = el("g", { "clip-path": "url(#plot)" }, svg);
  el("polyline", { points: c.ideal.map(([x, y]) => `${sx(x)},${sy(y)}`).join(" "), class: "ideal" }, plot);

  const legend = [{ label: "Linear", dashed: true }];
  c.series.forEach((s, i) => {
    const color = COLORS[i % COLORS.length];
    el("polyline", { points: s.points.map(([x, y]) => `${sx(x)},${sy(y)}`).join(" "), class: "series", stroke: color }, plot);
    for (const [x, y] of s.points) marker(s.marker, sx(x), sy(y), color, plot);
    legend.push({ label: s.label, color, marker: s.marker });
  });

  const lx = m.left + 12;
  legend.forEach((item, i) => {
    const ly = m.top + 12 + i * 18;
    if (item.dashed) {
      el("line", { x1: lx, x2: lx + 24, y1: ly, y2: ly, class: "ideal" }, svg);
    } else {
      el("line", { x1: lx, x2: lx + 24, y1: ly, y2: ly, stroke: item.color, "stroke-width": 1.5 }, svg);
      marker(item.marker, lx + 12, ly, item.color, svg);
    }
    el("text", { x: lx + 30, y: ly + 4 }, svg).textContent = item.label;
  });
}

function renderTable() {
  const t = DATA.table;
  const ncols = Math.max(t.col_labels.length, ...t.cells.map((r) => r.length));
  const head = document.getElementById("summaryHead");
  const body = document.getElementById("summaryBody");

  let h = "<tr><th></th>";
  for (let i = 0; i < ncols; i++) h += `<th>${escapeHtml(t.col_labels[i] ?? "")}</th>`;
  head.innerHTML = h + "</tr>";

  body.innerHTML = "";
  t.cells.forEach((row, i) => {
    const tr = document.createElement("tr");
    tr.innerHTML = `<th>${escapeHtml(t.row_labels[i])}</th>` +
      row.map((v) => `<td class="num">${v}</td>`).join("");
    body.appendChild(tr);
  });
}

document.getElementById("title").textContent = DATA.chart.title;
renderChart();
renderTable();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
