//! TUI rendering — orchestrates all panes.

pub mod history;
pub mod inputs;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs},
};
use weigh_core::store::WeightStore;

use crate::app::{App, Screen, StatusKind};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: WeightStore>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, selector, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(3), // person selector
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_selector(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Weight Tracker",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Selector ─────────────────────────────────────────────────────────────────

fn draw_selector<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let titles: Vec<Line> = app
    .roster
    .people()
    .iter()
    .map(|p| Line::from(p.as_str()))
    .collect();

  let tabs = Tabs::new(titles)
    .select(app.person_cursor)
    .block(
      Block::default()
        .title(" Select Person ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .highlight_style(
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );

  f.render_widget(tabs, area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  match app.screen {
    Screen::Setup => inputs::draw_setup(f, area, app),
    Screen::Log => {
      let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

      inputs::draw_log(f, rows[0], app);
      history::draw(f, rows[1], app);
    }
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: WeightStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match app.screen {
    Screen::Setup => ("SETUP", "←→ person  Enter save height  q quit"),
    Screen::Log => (
      "LOG",
      "←→ person  Tab field  Enter add  ↑↓ scroll  c chart  q quit",
    ),
  };

  let (text, text_style) = match &app.status {
    Some(status) => {
      let color = match status.kind {
        StatusKind::Success => Color::Green,
        StatusKind::Failure => Color::Red,
      };
      (status.text.clone(), Style::default().fg(color))
    }
    None => (hints.to_string(), Style::default().fg(Color::DarkGray)),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let text_span = Span::styled(format!("  {text}"), text_style);

  let line = Line::from(vec![mode_span, text_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
