//! End-to-end flow: from the sender's form to the recipient's answer.

use cupid_core::{EvadeProfile, FlowState, Outcome, codec, extract_token};
use cupid_types::{DraftError, FlowStep, Gender, NonEmptyString, Proposal, Viewport};
use url::Url;

fn base() -> Url {
    Url::parse("https://cupidon.example/").expect("base url")
}

fn fill(state: &mut FlowState, sender: &str, receiver: &str, phone: &str) {
    let draft = state.draft_mut().expect("setup draft");
    draft.sender_name = sender.to_string();
    draft.receiver_name = receiver.to_string();
    draft.sender_phone = phone.to_string();
}

fn link_for(sender: &str, receiver: &str, phone: &str, gender: Gender) -> Url {
    let mut state = FlowState::initial(None);
    fill(&mut state, sender, receiver, phone);
    let state = state.continue_to_gender().state;
    let state = state.choose_gender(Some(gender)).state;
    match state.generate_link(&base()).outcome {
        Outcome::LinkReady(link) => link,
        other => panic!("expected a link, got {other:?}"),
    }
}

#[test]
fn sender_link_opens_question_for_receiver() {
    let link = link_for("Jean", "Marie", "", Gender::Male);
    assert_eq!(link.query_pairs().count(), 1);

    let state = FlowState::initial(Some(link.as_str()));
    assert_eq!(state.step(), FlowStep::Ask);
    let proposal = state.proposal().expect("proposal");
    assert_eq!(proposal.sender_name(), "Jean");
    assert_eq!(proposal.receiver_name(), "Marie");
    assert_eq!(proposal.gender(), Gender::Male);
    assert_eq!(proposal.sender_phone(), None);
}

#[test]
fn guards_hold_before_link() {
    let mut state = FlowState::initial(None);
    fill(&mut state, "  ", "Marie", "");
    let transition = state.continue_to_gender();
    assert_eq!(
        transition.outcome,
        Outcome::Blocked(DraftError::SenderNameMissing)
    );
    assert_eq!(transition.state.step(), FlowStep::Setup);

    let mut state = transition.state;
    fill(&mut state, "Jean", "Marie", "");
    let state = state.continue_to_gender().state;
    let transition = state.choose_gender(None);
    assert_eq!(transition.outcome, Outcome::Blocked(DraftError::GenderUnset));
    assert_eq!(transition.state.step(), FlowStep::ChooseGender);
}

#[test]
fn phone_is_canonical_in_the_link_and_reply() {
    let link = link_for("Jean", "Marie", "6 12 34 56 78", Gender::Female);
    let state = FlowState::initial(Some(link.as_str()));
    assert_eq!(
        state.proposal().and_then(Proposal::sender_phone),
        Some("+237612345678")
    );

    let celebrate = state.accept().state;
    let reply = celebrate.reply_link("wa.me").expect("reply link");
    assert_eq!(reply.host_str(), Some("wa.me"));
    assert_eq!(reply.path(), "/+237612345678");
    let text = reply
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .expect("reply text");
    assert!(text.contains("ta Valentine !"));
}

#[test]
fn legacy_links_still_open() {
    let proposal = Proposal::new(
        NonEmptyString::new("Jean").expect("name"),
        NonEmptyString::new("Marie").expect("name"),
        Gender::Female,
    );
    let token = codec::encode(&proposal);
    let legacy = format!("https://cupidon.example/index.html?d={}", token.as_str());

    assert_eq!(extract_token(&legacy).as_deref(), Some(token.as_str()));
    let state = FlowState::initial(Some(&legacy));
    assert_eq!(state.proposal(), Some(&proposal));
}

#[test]
fn broken_links_fall_back_to_setup() {
    for shared in [
        "https://cupidon.example/?token=%%%",
        "https://cupidon.example/",
        "not-a-token",
        "",
    ] {
        let state = FlowState::initial(Some(shared));
        assert_eq!(state.step(), FlowStep::Setup, "{shared:?}");
    }
}

#[test]
fn declines_never_reach_celebrate() {
    let link = link_for("Jean", "Marie", "", Gender::Female);
    let mut state = FlowState::initial(Some(link.as_str()));
    for _ in 0..25 {
        state = state
            .decline(Viewport::new(120.0, 40.0), &EvadeProfile::TERMINAL)
            .state;
    }
    assert_eq!(state.step(), FlowStep::Ask);
    assert_eq!(state.declines().value(), 25);

    let transition = state.accept();
    assert_eq!(transition.state.step(), FlowStep::Celebrate);
    assert!(matches!(
        transition.outcome,
        Outcome::Accepted { notification: None }
    ));
}
