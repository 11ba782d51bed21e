use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::render_utils::{
    InputHint, centered_area, inner_area, render_container, render_hints,
};
use crate::state::DestinationState;

pub fn render_destination(frame: &mut Frame, dest: &DestinationState, area: Rect) {
    let card = centered_area(area, 50, 10);
    render_container(frame, card, dest.route.title(), Color::Green);
    let inner = inner_area(card, 2);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            dest.route.path(),
            Style::default().fg(Color::White),
        )),
    ];
    if let Some(role) = dest.role {
        lines.push(Line::from(Span::styled(
            format!("Signed in as {}", role.display_name()),
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("Arrived at {}", dest.arrived_at.format("%H:%M:%S")),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    let action = if dest.role.is_some() { "sign out" } else { "back" };
    let hints = [InputHint::new("Esc", action), InputHint::new("q", "quit")];
    render_hints(frame, inner, &hints, Color::Green);
}
