//! Login feature view.

use onduty_core::{Field, LoginMode, StatusKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{Focus, LoginState};
use crate::common::mask;
use crate::common::render_utils::{
    InputHint, InputLine, centered_area, inner_area, render_container, render_hints,
    render_input_line, render_separator,
};
use crate::common::text::truncate_with_ellipsis;

const ACCENT: Color = Color::Rgb(249, 115, 22);
const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 22;
const TAGLINE_WIDTH: u16 = 40;
/// Below this width the tagline panel is hidden.
const WIDE_LAYOUT_MIN: u16 = CARD_WIDTH + TAGLINE_WIDTH + 4;
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the login screen (tagline panel on wide terminals, form card).
pub fn render_login(frame: &mut Frame, login: &LoginState, area: Rect, spinner_frame: usize) {
    let wide = area.width >= WIDE_LAYOUT_MIN;
    let total_width = if wide {
        CARD_WIDTH + TAGLINE_WIDTH + 2
    } else {
        CARD_WIDTH
    };
    let outer = centered_area(area, total_width, CARD_HEIGHT);

    let card = if wide {
        let tagline = Rect::new(outer.x, outer.y, TAGLINE_WIDTH, outer.height);
        render_tagline(frame, tagline);
        Rect::new(
            outer.x + TAGLINE_WIDTH + 2,
            outer.y,
            outer.width.saturating_sub(TAGLINE_WIDTH + 2),
            outer.height,
        )
    } else {
        outer
    };

    render_form_card(frame, login, card, spinner_frame);
}

fn render_tagline(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let accent = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Your gateway to On-Duty: ", bold),
            Span::styled("A portal that opens the door to ", bold),
            Span::styled("Active Work.", accent),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("Every Head Count", bold),
            Span::raw(" - Tracking attendance in "),
            Span::styled("Real-Time.", accent),
        ]),
    ];
    let inner = Rect::new(area.x, area.y + 2, area.width, area.height.saturating_sub(2));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_form_card(frame: &mut Frame, login: &LoginState, area: Rect, spinner_frame: usize) {
    render_container(frame, area, "On-Duty Login", Color::Cyan);
    let inner = inner_area(area, 2);
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
    if inner.height < 18 {
        return;
    }

    frame.render_widget(
        Paragraph::new(mode_toggle_line(login)).alignment(Alignment::Center),
        row(0),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("A quick identity check: Pop in your "),
            Span::styled("\"Credentials\"", Style::default().fg(ACCENT)),
        ])),
        row(2),
    );

    render_field(frame, login, Field::Email, row(4), row(5), row(6));
    render_field(frame, login, Field::Password, row(7), row(8), row(9));

    frame.render_widget(Paragraph::new(options_line(login, inner.width)), row(10));
    render_separator(frame, inner, 11);

    if let Some(status) = &login.status {
        let color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Failure => Color::Red,
        };
        let icon = if status.is_success() { "✓" } else { "✗" };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                truncate_with_ellipsis(&format!("{icon} {}", status.text), inner.width as usize),
                Style::default().fg(color),
            ))),
            row(12),
        );
    }

    frame.render_widget(
        Paragraph::new(submit_line(login, spinner_frame)).alignment(Alignment::Center),
        row(14),
    );

    let hints = [
        InputHint::new("Tab", "next"),
        InputHint::new("Enter", "submit"),
        InputHint::new("Ctrl+P", "show password"),
        InputHint::new("Esc", "quit"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}

fn mode_toggle_line(login: &LoginState) -> Line<'static> {
    let focused = login.focus == Focus::Mode;
    let mut spans = Vec::new();
    for (idx, mode) in LoginMode::all().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        let selected = *mode == login.input.login_mode;
        let style = if selected {
            let style = Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD);
            if focused {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            }
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", mode.display_name()), style));
    }
    Line::from(spans)
}

fn render_field(
    frame: &mut Frame,
    login: &LoginState,
    field: Field,
    label_area: Rect,
    input_area: Rect,
    error_area: Rect,
) {
    let focus = match field {
        Field::Email => Focus::Email,
        Field::Password => Focus::Password,
    };
    let focused = login.focus == focus;
    let error = login.errors.get(field);
    let label_color = match (error.is_some(), focused) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::Gray,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(field.label(), Style::default().fg(label_color))),
        label_area,
    );

    let raw = login.input.value(field);
    let masked;
    let value = if field == Field::Password && !login.show_password {
        masked = mask(raw);
        masked.as_str()
    } else {
        raw
    };
    let placeholder = match field {
        Field::Email => "you@domain.com",
        Field::Password => "",
    };
    render_input_line(
        frame,
        input_area,
        &InputLine {
            value,
            placeholder: Some(placeholder).filter(|p| !p.is_empty()),
            prompt: "> ",
            focused,
            text_color: Color::White,
            accent_color: Color::Cyan,
        },
    );

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_with_ellipsis(message, error_area.width as usize),
                Style::default().fg(Color::Red),
            )),
            error_area,
        );
    }
}

fn options_line(login: &LoginState, width: u16) -> Line<'static> {
    let checkbox = if login.input.remember_me { "[x]" } else { "[ ]" };
    let remember = format!("{checkbox} Remember me");
    let link = "Forgotten Password?";

    let remember_style = focus_style(login.focus == Focus::RememberMe, Color::Gray);
    let link_style = focus_style(login.focus == Focus::ForgotPassword, Color::Blue)
        .add_modifier(Modifier::UNDERLINED);

    let used = remember.chars().count() + link.chars().count();
    let gap = (width as usize).saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(remember, remember_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(link, link_style),
    ])
}

fn submit_line(login: &LoginState, spinner_frame: usize) -> Line<'static> {
    if login.loading {
        let frame = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{frame} Logging in..."),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let focused = login.focus == Focus::Submit;
    let style = if !login.submit_enabled() {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled("[ Login › ]", style))
}

fn focus_style(focused: bool, color: Color) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}
