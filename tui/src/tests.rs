//! Unit tests for the TUI crate.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend};

use cupid_engine::{App, AppSettings, FlowStep, FormField, Gender, UiOptions};

use super::*;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        apply_event(app, key(KeyCode::Char(c)));
    }
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn new_app(shared: Option<&str>) -> App {
    App::new(AppSettings::defaults().unwrap(), shared)
}

fn link_app(gender: char) -> App {
    let mut app = new_app(None);
    type_text(&mut app, "Jean");
    apply_event(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "Marie");
    apply_event(&mut app, key(KeyCode::Enter));
    apply_event(&mut app, key(KeyCode::Char(gender)));
    app
}

fn asking_app() -> App {
    let mut app = link_app('f');
    apply_event(&mut app, key(KeyCode::Enter));
    let link = app.take_clipboard_request().unwrap().text;
    new_app(Some(&link))
}

fn render(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
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
fn typing_fills_focused_field() {
    let mut app = new_app(None);
    type_text(&mut app, "Jeann");
    apply_event(&mut app, key(KeyCode::Backspace));
    apply_event(&mut app, key(KeyCode::Down));
    apply_event(&mut app, Event::Paste("Marie\n".to_string()));

    assert_eq!(app.form().field(FormField::SenderName).text(), "Jean");
    assert_eq!(app.form().field(FormField::ReceiverName).text(), "Marie");
    assert_eq!(app.form().focus(), FormField::ReceiverName);

    apply_event(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.form().focus(), FormField::SenderName);
}

#[test]
fn release_events_are_ignored() {
    let mut app = new_app(None);
    let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    apply_event(&mut app, Event::Key(release));
    assert_eq!(app.form().field(FormField::SenderName).text(), "");
}

#[test]
fn escape_and_ctrl_c_quit() {
    let mut app = new_app(None);
    apply_event(&mut app, key(KeyCode::Esc));
    assert!(app.should_quit());

    let mut app = new_app(None);
    apply_event(
        &mut app,
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    );
    assert!(app.should_quit());
    assert_eq!(app.form().field(FormField::SenderName).text(), "");
}

#[test]
fn gender_keys_drive_choice() {
    let mut app = new_app(None);
    type_text(&mut app, "Jean");
    apply_event(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "Marie");
    apply_event(&mut app, key(KeyCode::Enter));
    assert_eq!(app.step(), FlowStep::ChooseGender);

    apply_event(&mut app, key(KeyCode::Right));
    assert_eq!(app.gender_highlight(), Some(Gender::Female));
    apply_event(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.step(), FlowStep::Setup);

    apply_event(&mut app, key(KeyCode::Enter));
    apply_event(&mut app, key(KeyCode::Char('f')));
    assert_eq!(app.step(), FlowStep::ProduceLink);
    assert_eq!(app.proposal().unwrap().gender(), Gender::Female);
}

#[test]
fn setup_screen_shows_fields() {
    let mut app = new_app(None);
    let screen = render(&mut app, 80, 24);
    assert!(screen.contains("Crée ta demande"));
    for field in FormField::ALL {
        assert!(screen.contains(field.label()), "{}", field.label());
    }
}

#[test]
fn guard_notice_is_drawn() {
    let mut app = new_app(None);
    apply_event(&mut app, key(KeyCode::Enter));
    let screen = render(&mut app, 80, 24);
    assert!(screen.contains("Remplis au moins les prénoms !"));
}

#[test]
fn ask_screen_lays_out_buttons() {
    let mut app = asking_app();
    assert_eq!(app.step(), FlowStep::Ask);

    let screen = render(&mut app, 80, 24);
    assert!(screen.contains("Marie, veux-tu être la Valentine de Jean ?"));
    assert!(screen.contains("OUI !"));
    assert!(screen.contains("Non"));

    // accept sits left of center, under the question band
    apply_event(&mut app, click(20, 9));
    assert_eq!(app.step(), FlowStep::Celebrate);

    let screen = render(&mut app, 80, 24);
    assert!(screen.contains("Jean & Marie pour toujours !"));
}

#[test]
fn hovering_decline_moves_it() {
    let mut app = asking_app();
    render(&mut app, 80, 24);

    apply_event(
        &mut app,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 50,
            row: 9,
            modifiers: KeyModifiers::NONE,
        }),
    );
    assert_eq!(app.flow().declines().value(), 1);
    assert!(app.decline_placement().is_some());

    let screen = render(&mut app, 80, 24);
    assert!(!screen.contains(phrases::DECLINE_PHRASES[0]));
}

#[test]
fn link_screen_mentions_receiver() {
    let mut app = link_app('h');
    let screen = render(&mut app, 80, 24);
    assert!(screen.contains("Pour Marie (HOMME)"));
    assert!(!screen.contains("https://"));

    apply_event(&mut app, key(KeyCode::Char('g')));
    assert!(app.take_clipboard_request().is_some());
    let screen = render(&mut app, 100, 30);
    assert!(screen.contains("https://cupidon.example/?token="));
}

#[test]
fn ascii_mode_draws_ascii_hearts() {
    let mut settings = AppSettings::defaults().unwrap();
    settings.ui = UiOptions {
        ascii_only: true,
        ..UiOptions::default()
    };
    let mut app = App::new(settings, None);
    app.tick(std::time::Duration::from_millis(700));
    let screen = render(&mut app, 80, 24);
    assert!(!screen.contains(['♥', '❤', '♡']));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut app = asking_app();
    render(&mut app, 20, 6);
    let mut app = new_app(None);
    render(&mut app, 12, 3);
}
