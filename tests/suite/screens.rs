//! The card as a terminal shows it, one screen per step.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use cupid_engine::{App, DECLINE_HIDE, FlowStep, phrases};
use cupid_tui::apply_event;

use crate::common::{app, screen};

fn key(app: &mut App, code: KeyCode) {
    apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(app: &mut App, text: &str) {
    apply_event(app, Event::Paste(text.to_string()));
}

#[test]
fn sender_walks_to_a_link_and_recipient_says_yes() {
    let mut sender = app(None);
    let shown = screen(&mut sender, 80, 24);
    assert!(shown.contains("Crée ta demande"));

    type_text(&mut sender, "Jean");
    key(&mut sender, KeyCode::Tab);
    type_text(&mut sender, "Marie");
    key(&mut sender, KeyCode::Enter);
    let shown = screen(&mut sender, 80, 24);
    assert!(shown.contains("Qui reçoit ta demande ?"));
    assert!(shown.contains("Marie est..."));
    assert!(shown.contains("HOMME"));
    assert!(shown.contains("FEMME"));

    key(&mut sender, KeyCode::Right);
    key(&mut sender, KeyCode::Enter);
    assert_eq!(sender.step(), FlowStep::ProduceLink);
    key(&mut sender, KeyCode::Enter);
    let link = sender
        .take_clipboard_request()
        .expect("link copied")
        .text;

    let mut recipient = app(Some(&link));
    let shown = screen(&mut recipient, 80, 24);
    assert!(shown.contains("Marie, veux-tu être la Valentine de Jean ?"));
    assert!(shown.contains(phrases::ACCEPT_LABEL));
    assert!(shown.contains(phrases::DEFAULT_DECLINE_LABEL));

    key(&mut recipient, KeyCode::Char('n'));
    key(&mut recipient, KeyCode::Enter);
    let shown = screen(&mut recipient, 80, 24);
    assert!(shown.contains("C'est un match !"));
    assert!(shown.contains("Jean & Marie pour toujours !"));
    assert!(!shown.contains("WhatsApp"));
}

#[test]
fn reply_hint_appears_with_a_phone() {
    let mut sender = app(None);
    type_text(&mut sender, "Jean");
    key(&mut sender, KeyCode::Tab);
    type_text(&mut sender, "Marie");
    key(&mut sender, KeyCode::Tab);
    key(&mut sender, KeyCode::Tab);
    type_text(&mut sender, "677 00 11 22");
    key(&mut sender, KeyCode::Enter);
    key(&mut sender, KeyCode::Char('f'));
    key(&mut sender, KeyCode::Char('g'));
    let link = sender.take_clipboard_request().expect("link copied").text;

    let mut recipient = app(Some(&link));
    key(&mut recipient, KeyCode::Enter);
    let shown = screen(&mut recipient, 100, 30);
    assert!(shown.contains("WhatsApp"));
    assert!(shown.contains("copier le lien de réponse"));

    key(&mut recipient, KeyCode::Char('c'));
    let reply = recipient.take_clipboard_request().expect("reply copied");
    assert!(reply.text.starts_with("https://wa.me/+237677001122?text="));
}

#[test]
fn declined_label_changes_each_time() {
    let mut sender = app(None);
    type_text(&mut sender, "Jean");
    key(&mut sender, KeyCode::Tab);
    type_text(&mut sender, "Marie");
    key(&mut sender, KeyCode::Enter);
    key(&mut sender, KeyCode::Char('h'));
    key(&mut sender, KeyCode::Enter);
    let link = sender.take_clipboard_request().expect("link copied").text;

    let mut recipient = app(Some(&link));
    screen(&mut recipient, 120, 40);
    for expected in &phrases::DECLINE_PHRASES[..3] {
        key(&mut recipient, KeyCode::Tab);
        recipient.tick(DECLINE_HIDE);
        let shown = screen(&mut recipient, 120, 40);
        assert!(shown.contains(expected), "{expected}");
    }
    assert_eq!(recipient.step(), FlowStep::Ask);
}
