use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, InputTarget, Screen};
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                match event::read() {
                    Ok(CtEvent::Key(k)) => {
                        if k.kind == KeyEventKind::Press
                            && tx.blocking_send(Event::Input(InputEvent::Key(k))).is_err()
                        {
                            break;
                        }
                    }
                    Ok(CtEvent::Resize(_, _)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Resize)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {}
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Key(k) => {
            if state.input.is_some() {
                return handle_prompt(k);
            }
            if let Some(action) = handle_global(k) {
                return Some(action);
            }
            match state.screen {
                Screen::Generator => handle_generator(k),
                Screen::Library => handle_library(k),
                Screen::Export => handle_export(k),
                Screen::Help => None,
            }
        }
    }
}

fn handle_prompt(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::CancelInput),
        KeyCode::Enter => Some(Action::SubmitInput),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_global(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Generator)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Library)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Export)),
        KeyCode::Char('4') | KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),
        _ => None,
    }
}

fn handle_generator(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char(' ') | KeyCode::Char('r') => Some(Action::Regenerate),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectPrevSlot),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectNextSlot),
        KeyCode::Enter | KeyCode::Char('p') => Some(Action::TogglePin),
        KeyCode::Char('s') => Some(Action::CycleSize),
        KeyCode::Char('f') => Some(Action::ToggleFormat),
        KeyCode::Char('d') => Some(Action::ToggleDarkPreview),
        KeyCode::Char('c') | KeyCode::Char('y') => Some(Action::CopySelected),
        KeyCode::Char('a') => Some(Action::SaveToLibrary),
        _ => None,
    }
}

fn handle_library(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Enter => Some(Action::ApplyEntry),
        KeyCode::Char('/') => Some(Action::BeginInput(InputTarget::Query)),
        KeyCode::Char('t') => Some(Action::BeginInput(InputTarget::Tag)),
        KeyCode::Char('e') => Some(Action::BeginInput(InputTarget::Rename)),
        KeyCode::Char('T') => Some(Action::BeginInput(InputTarget::Tags)),
        KeyCode::Char('f') => Some(Action::ToggleFavorite),
        KeyCode::Char('F') => Some(Action::ToggleFavoritesOnly),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::DeleteEntry),
        KeyCode::Char('C') => Some(Action::ClearFilters),
        _ => None,
    }
}

fn handle_export(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevExportFormat),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextExportFormat),
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('y') => Some(Action::CopyExport),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::TextInput;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_generator_keys() {
        let state = AppState::new();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char(' '))), Some(Action::Regenerate));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('p'))), Some(Action::TogglePin));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('2'))),
            Some(Action::SetScreen(Screen::Library))
        );
    }

    #[test]
    fn test_same_key_differs_by_screen() {
        let mut state = AppState::new();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('f'))), Some(Action::ToggleFormat));
        state.screen = Screen::Library;
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('f'))), Some(Action::ToggleFavorite));
        state.screen = Screen::Help;
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('f'))), None);
    }

    #[test]
    fn test_prompt_captures_text() {
        let mut state = AppState::new();
        state.screen = Screen::Library;
        state.input = Some(TextInput {
            target: InputTarget::Query,
            buffer: String::new(),
        });
        // 'q' types instead of quitting while a prompt is open.
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Esc)), Some(Action::CancelInput));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::SubmitInput));
    }
}
