//! Flow controller: which screen of the card is active and how actions move
//! between screens.
//!
//! ```text
//! Setup --names--> ChooseGender --gender--> ProduceLink --generate--> ProduceLink
//! (valid shared token) ------------------------------> Ask --decline--> Ask
//!                                                      Ask --accept---> Celebrate
//! ```
//!
//! [`FlowState`] is an owned value. Every action consumes it and hands back a
//! [`Transition`] holding the next state and what happened. Blocked or
//! ignored actions hand the state back untouched.

use url::Url;

use cupid_types::{
    ButtonPlacement, DeclineCounter, DraftError, FlowStep, Gender, Proposal, ProposalDraft,
    Viewport,
};

use crate::{
    codec,
    evade::{EvadeProfile, evade},
    notification::Notification,
    phone::canonicalize_phone,
    phrases, share,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Sender is filling in names and contact details.
    Setup { draft: ProposalDraft },
    /// Names are in; waiting for the recipient's gender.
    ChooseGender { draft: ProposalDraft },
    /// Proposal is complete; the link can be generated and copied.
    ProduceLink {
        proposal: Proposal,
        link: Option<Url>,
    },
    /// Recipient is looking at the question.
    Ask {
        proposal: Proposal,
        declines: DeclineCounter,
        placement: Option<ButtonPlacement>,
    },
    /// Terminal.
    Celebrate { proposal: Proposal },
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Setup {
            draft: ProposalDraft::default(),
        }
    }
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: FlowState,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Moved to the next screen.
    Advanced,
    /// A guard failed; state is unchanged.
    Blocked(DraftError),
    /// The action means nothing on the current screen.
    Ignored,
    /// A share link was generated and should be offered for copying.
    LinkReady(Url),
    /// The decline control moved and now shows `label`.
    Evaded {
        placement: ButtonPlacement,
        label: &'static str,
    },
    /// The recipient said yes. `notification` is present when the sender
    /// left an email address.
    Accepted {
        notification: Option<Notification>,
    },
}

impl Transition {
    fn new(state: FlowState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }

    fn ignored(state: FlowState) -> Self {
        Self::new(state, Outcome::Ignored)
    }
}

impl FlowState {
    /// Starting state for a session.
    ///
    /// `shared` is whatever the card was opened with: a share link, a query
    /// string or a bare token. A valid proposal goes straight to the ask
    /// screen; anything else starts the setup form.
    #[must_use]
    pub fn initial(shared: Option<&str>) -> Self {
        let Some(raw) = shared.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };

        match share::extract_token(raw).and_then(|token| codec::decode(&token)) {
            Some(proposal) => {
                tracing::info!(
                    gender = proposal.gender().as_str(),
                    "Opened shared proposal"
                );
                Self::ask(proposal)
            }
            None => {
                tracing::debug!("Shared input carried no valid proposal; starting at setup");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn ask(proposal: Proposal) -> Self {
        FlowState::Ask {
            proposal,
            declines: DeclineCounter::ZERO,
            placement: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> FlowStep {
        match self {
            FlowState::Setup { .. } => FlowStep::Setup,
            FlowState::ChooseGender { .. } => FlowStep::ChooseGender,
            FlowState::ProduceLink { .. } => FlowStep::ProduceLink,
            FlowState::Ask { .. } => FlowStep::Ask,
            FlowState::Celebrate { .. } => FlowStep::Celebrate,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&ProposalDraft> {
        match self {
            FlowState::Setup { draft } | FlowState::ChooseGender { draft } => Some(draft),
            _ => None,
        }
    }

    /// Form fields are only editable on the setup screen.
    pub fn draft_mut(&mut self) -> Option<&mut ProposalDraft> {
        match self {
            FlowState::Setup { draft } => Some(draft),
            _ => None,
        }
    }

    #[must_use]
    pub fn proposal(&self) -> Option<&Proposal> {
        match self {
            FlowState::ProduceLink { proposal, .. }
            | FlowState::Ask { proposal, .. }
            | FlowState::Celebrate { proposal } => Some(proposal),
            FlowState::Setup { .. } | FlowState::ChooseGender { .. } => None,
        }
    }

    #[must_use]
    pub fn link(&self) -> Option<&Url> {
        match self {
            FlowState::ProduceLink { link, .. } => link.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn declines(&self) -> DeclineCounter {
        match self {
            FlowState::Ask { declines, .. } => *declines,
            _ => DeclineCounter::ZERO,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Option<ButtonPlacement> {
        match self {
            FlowState::Ask { placement, .. } => *placement,
            _ => None,
        }
    }

    #[must_use]
    pub fn decline_label(&self) -> &'static str {
        phrases::decline_label(self.declines())
    }

    /// Setup -> ChooseGender, once both names are filled in.
    #[must_use]
    pub fn continue_to_gender(self) -> Transition {
        match self {
            FlowState::Setup { draft } => match draft.check_names() {
                Ok(_) => Transition::new(FlowState::ChooseGender { draft }, Outcome::Advanced),
                Err(reason) => {
                    tracing::debug!(%reason, "Setup blocked");
                    Transition::new(FlowState::Setup { draft }, Outcome::Blocked(reason))
                }
            },
            other => Transition::ignored(other),
        }
    }

    /// ChooseGender -> ProduceLink, once a gender is picked.
    #[must_use]
    pub fn choose_gender(self, gender: Option<Gender>) -> Transition {
        match self {
            FlowState::ChooseGender { mut draft } => {
                draft.gender = gender;
                match draft.to_proposal() {
                    Ok(proposal) => Transition::new(
                        FlowState::ProduceLink {
                            proposal,
                            link: None,
                        },
                        Outcome::Advanced,
                    ),
                    Err(reason) => {
                        tracing::debug!(%reason, "Gender choice blocked");
                        Transition::new(FlowState::ChooseGender { draft }, Outcome::Blocked(reason))
                    }
                }
            }
            other => Transition::ignored(other),
        }
    }

    /// Build the share link for the current proposal.
    ///
    /// The phone is canonicalized before encoding. Generating again yields
    /// the same link. A proposal whose token would not decode again is
    /// blocked with [`DraftError::TooLong`].
    #[must_use]
    pub fn generate_link(self, base: &Url) -> Transition {
        match self {
            FlowState::ProduceLink { proposal, link } => {
                let canonical = proposal.clone().map_sender_phone(canonicalize_phone);
                let token = codec::encode(&canonical);
                if token.as_str().len() > codec::MAX_TOKEN_LEN {
                    tracing::debug!(len = token.as_str().len(), "Share token too long");
                    return Transition::new(
                        FlowState::ProduceLink { proposal, link },
                        Outcome::Blocked(DraftError::TooLong),
                    );
                }
                let proposal = canonical;
                let link = share::share_url(base, &token);
                tracing::info!(
                    has_email = proposal.sender_email().is_some(),
                    has_phone = proposal.sender_phone().is_some(),
                    "Share link generated"
                );
                Transition::new(
                    FlowState::ProduceLink {
                        proposal,
                        link: Some(link.clone()),
                    },
                    Outcome::LinkReady(link),
                )
            }
            other => Transition::ignored(other),
        }
    }

    /// Ask -> Ask: the decline control runs to a random spot.
    #[must_use]
    pub fn decline(self, viewport: Viewport, profile: &EvadeProfile) -> Transition {
        if matches!(self, FlowState::Ask { .. }) {
            self.decline_to(evade(viewport, profile))
        } else {
            Transition::ignored(self)
        }
    }

    /// Ask -> Ask with an explicit placement.
    #[must_use]
    pub fn decline_to(self, placement: ButtonPlacement) -> Transition {
        match self {
            FlowState::Ask {
                proposal, declines, ..
            } => {
                let declines = declines.incremented();
                let label = phrases::decline_label(declines);
                tracing::debug!(declines = declines.value(), label, "Decline evaded");
                Transition::new(
                    FlowState::Ask {
                        proposal,
                        declines,
                        placement: Some(placement),
                    },
                    Outcome::Evaded { placement, label },
                )
            }
            other => Transition::ignored(other),
        }
    }

    /// Ask -> Celebrate. Never waits on the notification.
    #[must_use]
    pub fn accept(self) -> Transition {
        match self {
            FlowState::Ask { proposal, .. } => {
                let notification = Notification::for_acceptance(&proposal);
                if notification.is_none() {
                    tracing::debug!("No sender email; skipping notification");
                }
                Transition::new(
                    FlowState::Celebrate { proposal },
                    Outcome::Accepted { notification },
                )
            }
            other => Transition::ignored(other),
        }
    }

    /// Messaging deep link for the reply, on the celebrate screen only.
    #[must_use]
    pub fn reply_link(&self, host: &str) -> Option<Url> {
        match self {
            FlowState::Celebrate { proposal } => {
                share::reply_url(host, proposal.sender_phone()?, proposal.gender())
            }
            _ => None,
        }
    }
}
