//! Acceptance notifications wired from a config file through the card.

use std::fs;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

use cupid_core::codec;
use cupid_engine::{App, AppSettings, CupidConfig, FlowStep, notifier_from_config};
use cupid_notify::SEND_PATH;
use cupid_types::{Gender, NonEmptyString, Proposal};

fn config_with_endpoint(endpoint: &str) -> CupidConfig {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            r#"
[app]
base_url = "https://cupidon.example/carte/"

[notify]
service_id = "service_cupidon"
template_id = "template_2pw9cwa"
public_key = "pk_live"
endpoint = "{endpoint}"
"#
        ),
    )
    .expect("write config");
    CupidConfig::load_from(&path)
        .expect("valid config")
        .expect("config present")
}

fn token(email: &str) -> String {
    let proposal = Proposal::new(
        NonEmptyString::new("Jean").expect("name"),
        NonEmptyString::new("Marie").expect("name"),
        Gender::Female,
    )
    .with_sender_email(email);
    codec::encode(&proposal).into_inner()
}

fn press(app: &mut App, code: KeyCode) {
    cupid_tui::apply_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

#[tokio::test]
async fn yes_emails_the_sender() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(serde_json::json!({
            "service_id": "service_cupidon",
            "template_id": "template_2pw9cwa",
            "user_id": "pk_live",
            "template_params": {
                "to_name": "Jean",
                "to_email": "jean@mail.com",
                "from_name": "Marie"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_with_endpoint(&server.uri());
    let settings = AppSettings::from_config(&config).expect("settings");
    assert_eq!(settings.base_url.as_str(), "https://cupidon.example/carte/");

    let notifier = notifier_from_config(&config).expect("notifier");
    let mut app = App::new(settings, Some(&token("jean@mail.com"))).with_notifier(notifier);
    assert_eq!(app.step(), FlowStep::Ask);

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.step(), FlowStep::Ask);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.step(), FlowStep::Celebrate);

    app.take_notification_task()
        .expect("notification dispatched")
        .await
        .expect("task joined");
}

#[tokio::test]
async fn no_email_means_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_with_endpoint(&server.uri());
    let settings = AppSettings::from_config(&config).expect("settings");
    let notifier = notifier_from_config(&config).expect("notifier");
    let mut app = App::new(settings, Some(&token(""))).with_notifier(notifier);

    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.step(), FlowStep::Celebrate);
    assert!(app.take_notification_task().is_none());
}
