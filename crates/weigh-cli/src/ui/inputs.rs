//! Input panes — height setup and the weight form.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use weigh_core::store::WeightStore;

use crate::{
  app::{App, Field},
  form::HEIGHT_RANGE_CM,
};

/// One `label  value_` line; the cursor marker shows on the focused input.
fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
  let value_style = if focused {
    Style::default()
      .fg(Color::Yellow)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  };
  let cursor = if focused { "_" } else { "" };

  Line::from(vec![
    Span::styled(
      format!("{label:<20}"),
      Style::default().fg(Color::Cyan),
    ),
    Span::styled(format!("{value}{cursor}"), value_style),
  ])
}

/// First-time setup: ask for a height.
pub fn draw_setup<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let block = Block::default()
    .title(format!(" First-time setup for {} ", app.selected_person()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    input_line("Height (cm)", &app.height_input, true),
    Line::from(""),
    Line::from(Span::styled(
      format!(
        "Between {:.1} and {:.1} cm. Press Enter to save.",
        HEIGHT_RANGE_CM.start(),
        HEIGHT_RANGE_CM.end()
      ),
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

/// Returning user: recorded height plus the date/weight form.
pub fn draw_log<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let block = Block::default()
    .title(format!(" Welcome back, {} ", app.selected_person()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let height = app
    .person
    .as_ref()
    .map(|p| format!("Recorded height: {:.1} cm", p.height_cm))
    .unwrap_or_default();

  let lines = vec![
    Line::from(Span::styled(height, Style::default().fg(Color::DarkGray))),
    Line::from(""),
    input_line("Date", &app.date_input, app.focus == Field::Date),
    input_line("Current Weight (kg)", &app.weight_input, app.focus == Field::Weight),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
