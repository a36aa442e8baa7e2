//! The proposal record carried from sender to recipient.
//!
//! Two shapes exist. [`ProposalDraft`] is what the setup form edits: plain
//! strings and an optional gender. [`Proposal`] is the validated record that
//! the share link encodes; holding one proves both names are present and a
//! gender was chosen.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NonEmptyString;

/// Gender of the recipient. Chooses the wording on the ask and reply screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender {0:?} (expected \"male\" or \"female\")")]
pub struct GenderParseError(pub String);

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Strict wire parse: only the exact lowercase names are accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GenderParseError(s.to_string()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated proposal.
///
/// Optional contact fields are never `Some("")`: blank input collapses to
/// `None` at construction, so equality survives an encode/decode cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    sender_name: NonEmptyString,
    receiver_name: NonEmptyString,
    sender_email: Option<String>,
    sender_phone: Option<String>,
    gender: Gender,
}

impl Proposal {
    #[must_use]
    pub fn new(sender_name: NonEmptyString, receiver_name: NonEmptyString, gender: Gender) -> Self {
        Self {
            sender_name,
            receiver_name,
            sender_email: None,
            sender_phone: None,
            gender,
        }
    }

    #[must_use]
    pub fn with_sender_email(mut self, email: impl Into<String>) -> Self {
        self.sender_email = non_blank(email.into());
        self
    }

    #[must_use]
    pub fn with_sender_phone(mut self, phone: impl Into<String>) -> Self {
        self.sender_phone = non_blank(phone.into());
        self
    }

    /// Rewrite the phone number in place of the current one, if any.
    #[must_use]
    pub fn map_sender_phone(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.sender_phone = self.sender_phone.as_deref().map(f).and_then(non_blank);
        self
    }

    #[must_use]
    pub fn sender_name(&self) -> &str {
        self.sender_name.as_str()
    }

    #[must_use]
    pub fn receiver_name(&self) -> &str {
        self.receiver_name.as_str()
    }

    #[must_use]
    pub fn sender_email(&self) -> Option<&str> {
        self.sender_email.as_deref()
    }

    #[must_use]
    pub fn sender_phone(&self) -> Option<&str> {
        self.sender_phone.as_deref()
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Why a draft cannot become a [`Proposal`] yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("both names are required")]
    NamesMissing,
    #[error("your name is required")]
    SenderNameMissing,
    #[error("their name is required")]
    ReceiverNameMissing,
    #[error("a gender must be selected")]
    GenderUnset,
    #[error("the proposal does not fit in a share link")]
    TooLong,
}

/// Editable form state: the setup screen writes into this directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalDraft {
    pub sender_name: String,
    pub receiver_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub gender: Option<Gender>,
}

impl ProposalDraft {
    /// Check the name guard without consuming the draft. Names come back
    /// trimmed.
    pub fn check_names(&self) -> Result<(NonEmptyString, NonEmptyString), DraftError> {
        let sender = NonEmptyString::new(self.sender_name.trim());
        let receiver = NonEmptyString::new(self.receiver_name.trim());
        match (sender, receiver) {
            (Ok(sender), Ok(receiver)) => Ok((sender, receiver)),
            (Err(_), Err(_)) => Err(DraftError::NamesMissing),
            (Err(_), Ok(_)) => Err(DraftError::SenderNameMissing),
            (Ok(_), Err(_)) => Err(DraftError::ReceiverNameMissing),
        }
    }

    pub fn to_proposal(&self) -> Result<Proposal, DraftError> {
        let (sender, receiver) = self.check_names()?;
        let gender = self.gender.ok_or(DraftError::GenderUnset)?;
        Ok(Proposal::new(sender, receiver, gender)
            .with_sender_email(self.sender_email.clone())
            .with_sender_phone(self.sender_phone.clone()))
    }
}
