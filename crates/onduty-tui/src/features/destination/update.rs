use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationIntent {
    SignOut,
    Quit,
}

pub fn key_intent(key: KeyEvent) -> Option<DestinationIntent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(DestinationIntent::Quit),
        KeyCode::Char('q') => Some(DestinationIntent::Quit),
        KeyCode::Esc | KeyCode::Enter => Some(DestinationIntent::SignOut),
        _ => None,
    }
}
