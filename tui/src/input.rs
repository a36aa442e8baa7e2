//! Input handling for the Cupid TUI.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tracing::debug;

use cupid_engine::{App, FlowStep, Gender};

const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Drain pending terminal events into `app`, waiting at most `timeout` for
/// the first one. Returns whether the app should quit.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<bool> {
    if event::poll(timeout)? {
        for _ in 0..MAX_EVENTS_PER_FRAME {
            apply_event(app, event::read()?);
            if app.should_quit() || !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
    flush_clipboard(app);
    Ok(app.should_quit())
}

/// Write any pending clipboard text and report back to the app.
pub fn flush_clipboard(app: &mut App) {
    if let Some(request) = app.take_clipboard_request() {
        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(request.text))
            .map_err(|err| err.to_string());
        app.clipboard_finished(request.target, result);
    }
}

pub fn apply_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => apply_key(app, key),
        Event::Mouse(mouse) => apply_mouse(app, mouse),
        Event::Paste(text) => {
            if let Some(form) = app.form_mut() {
                form.focused_mut().enter_text(&text);
            }
        }
        _ => {}
    }
}

fn apply_key(app: &mut App, key: KeyEvent) {
    if matches!(key.kind, KeyEventKind::Release) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }
    if key.code == KeyCode::Esc {
        app.request_quit();
        return;
    }

    match app.step() {
        FlowStep::Setup => setup_key(app, key),
        FlowStep::ChooseGender => match key.code {
            KeyCode::Left => app.set_gender_highlight(Gender::Male),
            KeyCode::Right => app.set_gender_highlight(Gender::Female),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => app.cycle_gender_highlight(),
            KeyCode::Char('h' | 'H') => app.choose_gender(Some(Gender::Male)),
            KeyCode::Char('f' | 'F') => app.choose_gender(Some(Gender::Female)),
            KeyCode::Enter => app.confirm_gender(),
            KeyCode::Backspace => app.back_to_setup(),
            _ => {}
        },
        FlowStep::ProduceLink => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('g' | 'G')) {
                app.generate_link();
            }
        }
        FlowStep::Ask => match key.code {
            KeyCode::Enter | KeyCode::Char('o' | 'O' | 'y' | 'Y') => app.accept(),
            KeyCode::Tab | KeyCode::Char('n' | 'N') => app.decline(),
            _ => {}
        },
        FlowStep::Celebrate => {
            if matches!(key.code, KeyCode::Char('c' | 'C')) {
                app.copy_reply_link();
            }
        }
    }
}

fn setup_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit_setup();
        return;
    }
    let Some(form) = app.form_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.focused_mut().move_cursor_left(),
        KeyCode::Right => form.focused_mut().move_cursor_right(),
        KeyCode::Home => form.focused_mut().move_cursor_home(),
        KeyCode::End => form.focused_mut().move_cursor_end(),
        KeyCode::Backspace => form.focused_mut().delete_char(),
        KeyCode::Delete => form.focused_mut().delete_char_forward(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.focused_mut().clear();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            form.focused_mut().enter_char(c);
        }
        _ => {}
    }
}

fn apply_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            debug!(column = mouse.column, row = mouse.row, "Pointer pressed");
            app.pointer_pressed(mouse.column, mouse.row);
        }
        _ => {}
    }
}
