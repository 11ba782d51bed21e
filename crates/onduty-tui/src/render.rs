//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;

use crate::features::{destination, login};
use crate::state::{AppState, Screen};

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &app.screen {
        Screen::Login(state) => login::render_login(frame, state, area, app.spinner_frame),
        Screen::Destination(dest) => destination::render_destination(frame, dest, area),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use onduty_core::{Field, LoginMode};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::events::{LoginAction, UiEvent};
    use crate::features::login::Focus;
    use crate::state::Timing;
    use crate::update::update;

    fn screen_text(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_login_screen_masks_password_and_shows_toggle() {
        let mut app = AppState::with_timing(Timing::default(), LoginMode::Employee);
        update(
            &mut app,
            UiEvent::Login(LoginAction::Input {
                field: Field::Password,
                value: "secret".into(),
            }),
        );

        let text = screen_text(&app, 80, 30);
        assert!(text.contains("Employee"));
        assert!(text.contains("Admin"));
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
        assert!(text.contains("Forgotten Password?"));
    }

    fn press(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
        update(app, UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers))));
    }

    #[test]
    fn test_ctrl_p_reveals_and_hides_password() {
        let mut app = AppState::with_timing(Timing::default(), LoginMode::Employee);
        update(
            &mut app,
            UiEvent::Login(LoginAction::Input {
                field: Field::Password,
                value: "secret".into(),
            }),
        );

        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        let text = screen_text(&app, 80, 30);
        assert!(text.contains("secret"));
        assert!(!text.contains("••••••"));

        press(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        let text = screen_text(&app, 80, 30);
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_space_ticks_remember_me() {
        let mut app = AppState::with_timing(Timing::default(), LoginMode::Employee);
        assert!(screen_text(&app, 80, 30).contains("[ ] Remember me"));

        update(&mut app, UiEvent::Login(LoginAction::Focus(Focus::RememberMe)));
        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(screen_text(&app, 80, 30).contains("[x] Remember me"));

        press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(screen_text(&app, 80, 30).contains("[ ] Remember me"));
    }

    #[test]
    fn test_rejected_submit_renders_banner_and_field_errors() {
        let mut app = AppState::with_timing(Timing::default(), LoginMode::Employee);
        update(&mut app, UiEvent::Login(LoginAction::Submit));

        let text = screen_text(&app, 120, 30);
        assert!(text.contains("Please correct the errors above."));
        assert!(text.contains("Please enter a valid email address"));
        assert!(text.contains("Password cannot be empty"));
        assert!(text.contains("Every Head Count"));
    }

    #[test]
    fn test_destination_screen_shows_route() {
        let mut app = AppState::with_timing(Timing::default(), LoginMode::Employee);
        update(&mut app, UiEvent::Login(LoginAction::ForgotPassword));

        let text = screen_text(&app, 80, 20);
        assert!(text.contains("/ForgotPassword"));
    }
}
