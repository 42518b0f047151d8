//! Records pane — table of observations and the optional chart.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  symbols::Marker,
  text::Span,
  widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
};
use weigh_core::{entry::WeightEntry, store::WeightStore};

use crate::{app::App, form};

/// Render the records pane into `area`.
pub fn draw<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let person = app.selected_person();

  if app.entries.is_empty() {
    let block = Block::default()
      .title(" Weight Records ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new(form::no_records(person)).style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  if app.show_chart {
    let cols = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Length(42), Constraint::Min(0)])
      .split(area);
    draw_table(f, cols[0], app);
    draw_chart(f, cols[1], &app.entries);
  } else {
    draw_table(f, area, app);
  }
}

fn draw_table<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let header = Row::new(vec!["Date", "Weight (kg)", "Target (kg)"]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let rows: Vec<Row> = app
    .entries
    .iter()
    .skip(app.history_scroll)
    .map(|e| {
      let delta_style = if e.delta_kg() > 0.0 {
        Style::default().fg(Color::Yellow)
      } else {
        Style::default().fg(Color::Green)
      };
      Row::new(vec![
        Cell::from(e.date.format(form::DATE_FORMAT).to_string()),
        Cell::from(format!("{:>11.1}", e.current_weight_kg)).style(delta_style),
        Cell::from(format!("{:>11.2}", e.target_weight_kg)),
      ])
    })
    .collect();

  let table = Table::new(
    rows,
    [
      Constraint::Length(10),
      Constraint::Length(12),
      Constraint::Length(12),
    ],
  )
  .header(header)
  .block(
    Block::default()
      .title(format!(" Weight Records for {} ", app.selected_person()))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray)),
  );

  f.render_widget(table, area);
}

// ─── Chart ────────────────────────────────────────────────────────────────────

/// Plot-ready points: x is days since the first observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
  pub weight:   Vec<(f64, f64)>,
  pub target:   Vec<(f64, f64)>,
  pub x_bounds: [f64; 2],
  pub y_bounds: [f64; 2],
  /// Dates of the first and last observation.
  pub x_labels: [String; 2],
}

/// Margin added above and below the plotted weights, in kg.
const Y_MARGIN_KG: f64 = 2.0;

/// Build chart series from date-ordered entries. `None` if there are none.
pub fn chart_series(entries: &[WeightEntry]) -> Option<ChartSeries> {
  let first = entries.first()?;
  let last = entries.last()?;

  let x = |e: &WeightEntry| (e.date - first.date).num_days() as f64;

  let weight: Vec<(f64, f64)> = entries.iter().map(|e| (x(e), e.current_weight_kg)).collect();
  let target: Vec<(f64, f64)> = entries.iter().map(|e| (x(e), e.target_weight_kg)).collect();

  let (lo, hi) = entries
    .iter()
    .flat_map(|e| [e.current_weight_kg, e.target_weight_kg])
    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

  // A single day still needs a non-empty x range.
  let x_max = x(last).max(1.0);

  Some(ChartSeries {
    weight,
    target,
    x_bounds: [0.0, x_max],
    y_bounds: [(lo - Y_MARGIN_KG).max(0.0), hi + Y_MARGIN_KG],
    x_labels: [
      first.date.format(form::DATE_FORMAT).to_string(),
      last.date.format(form::DATE_FORMAT).to_string(),
    ],
  })
}

fn draw_chart(f: &mut Frame, area: Rect, entries: &[WeightEntry]) {
  let Some(series) = chart_series(entries) else {
    return;
  };

  let datasets = vec![
    Dataset::default()
      .name("Current")
      .marker(Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Cyan))
      .data(&series.weight),
    Dataset::default()
      .name("Target")
      .marker(Marker::Dot)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Green))
      .data(&series.target),
  ];

  let [y_lo, y_hi] = series.y_bounds;
  let chart = Chart::new(datasets)
    .block(
      Block::default()
        .title(" Weight Chart ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .x_axis(
      Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::DarkGray))
        .bounds(series.x_bounds)
        .labels(series.x_labels.iter().map(|l| Span::raw(l.as_str()))),
    )
    .y_axis(
      Axis::default()
        .title("kg")
        .style(Style::default().fg(Color::DarkGray))
        .bounds(series.y_bounds)
        .labels([format!("{y_lo:.1}"), format!("{y_hi:.1}")]),
    );

  f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn entry(id: i64, (y, m, d): (i32, u32, u32), current: f64, target: f64) -> WeightEntry {
    WeightEntry {
      id,
      person_id: "A".into(),
      date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
      current_weight_kg: current,
      target_weight_kg: target,
    }
  }

  #[test]
  fn no_entries_no_series() {
    assert!(chart_series(&[]).is_none());
  }

  #[test]
  fn x_is_days_since_first_entry() {
    let entries = [
      entry(1, (2024, 1, 1), 80.0, 70.0),
      entry(2, (2024, 1, 11), 79.0, 70.0),
      entry(3, (2024, 2, 1), 78.0, 70.0),
    ];
    let s = chart_series(&entries).unwrap();

    assert_eq!(s.weight, [(0.0, 80.0), (10.0, 79.0), (31.0, 78.0)]);
    assert_eq!(s.target, [(0.0, 70.0), (10.0, 70.0), (31.0, 70.0)]);
    assert_eq!(s.x_bounds, [0.0, 31.0]);
    assert_eq!(s.y_bounds, [68.0, 82.0]);
    assert_eq!(s.x_labels, ["2024-01-01".to_string(), "2024-02-01".to_string()]);
  }

  #[test]
  fn single_entry_has_nonempty_x_range() {
    let s = chart_series(&[entry(1, (2024, 1, 1), 1.0, 0.5)]).unwrap();
    assert_eq!(s.x_bounds, [0.0, 1.0]);
    // Lower bound never drops below zero.
    assert_eq!(s.y_bounds, [0.0, 3.0]);
  }
}
