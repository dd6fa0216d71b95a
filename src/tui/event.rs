use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus, FormField, Mode};

/// Action returned to the run loop. Variants that touch the backend are
/// executed by the caller, which owns the API handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Toggle,
    ConfirmDelete,
    Refresh,
    Continue,
}

/// Handle a key press. Navigation and pure form edits mutate the app
/// directly; everything that needs the network comes back as an action.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match app.mode {
        Mode::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => KeyAction::ConfirmDelete,
            _ => {
                app.mode = Mode::Normal;
                KeyAction::Continue
            }
        },
        Mode::Normal => match app.focus {
            Focus::List => handle_list_key(app, key),
            Focus::Form => handle_form_key(app, key),
        },
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            KeyAction::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            KeyAction::Continue
        }
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Toggle,
        KeyCode::Char('e') => {
            app.start_edit();
            KeyAction::Continue
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.request_delete();
            KeyAction::Continue
        }
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('a') | KeyCode::Tab => {
            app.focus = Focus::Form;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel an in-progress edit, otherwise just leave the form.
            if app.editing.is_some() {
                app.cancel_edit();
            }
            app.focus = Focus::List;
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Tab | KeyCode::Down => {
            app.form.next_field();
            KeyAction::Continue
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.prev_field();
            KeyAction::Continue
        }
        KeyCode::Left if app.form.focused == FormField::Priority => {
            app.form.priority = app.form.priority.prev();
            KeyAction::Continue
        }
        KeyCode::Right | KeyCode::Char(' ')
            if app.form.focused == FormField::Priority =>
        {
            app.form.priority = app.form.priority.next();
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            if let Some(buf) = app.form.focused_buf_mut() {
                buf.pop();
            }
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            if let Some(buf) = app.form.focused_buf_mut() {
                buf.push(c);
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
