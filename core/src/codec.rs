//! Share-token codec.
//!
//! A token is the proposal serialized as a small JSON object
//! (`{from, to, email, phone, g}`), then base64 encoded with the URL-safe
//! alphabet and no padding. It is obfuscation, not protection: anyone holding
//! a token can read and rewrite it.
//!
//! Decoding never fails loudly. Anything that does not yield a complete
//! proposal is reported as "no shared state" and the reason goes to the log.

use std::fmt;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::Deserialize;
use thiserror::Error;

use cupid_types::{Gender, NonEmptyString, Proposal};

/// Tokens longer than this are rejected before any decoding work.
pub const MAX_TOKEN_LEN: usize = 4 * 1024;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
// Links from the first version of the card used the standard alphabet.
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Opaque, URL-safe encoding of a [`Proposal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is empty")]
    Empty,
    #[error("token is {len} bytes, above the {max} byte limit", max = MAX_TOKEN_LEN)]
    TooLong { len: usize },
    #[error("token is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a proposal object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sender name is missing")]
    MissingSender,
    #[error("receiver name is missing")]
    MissingReceiver,
    #[error("gender {0:?} is not male or female")]
    Gender(Option<String>),
}

#[derive(Deserialize)]
struct WirePayload {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    g: Option<String>,
}

impl TryFrom<WirePayload> for Proposal {
    type Error = DecodeError;

    fn try_from(wire: WirePayload) -> Result<Self, Self::Error> {
        let sender = wire
            .from
            .and_then(|name| NonEmptyString::new(name).ok())
            .ok_or(DecodeError::MissingSender)?;
        let receiver = wire
            .to
            .and_then(|name| NonEmptyString::new(name).ok())
            .ok_or(DecodeError::MissingReceiver)?;
        let gender = match wire.g.as_deref().and_then(Gender::parse) {
            Some(gender) => gender,
            None => return Err(DecodeError::Gender(wire.g)),
        };

        Ok(Proposal::new(sender, receiver, gender)
            .with_sender_email(wire.email.unwrap_or_default())
            .with_sender_phone(wire.phone.unwrap_or_default()))
    }
}

/// Encode a proposal into a share token.
///
/// Absent contact fields are written as empty strings so every token carries
/// the same five keys.
#[must_use]
pub fn encode(proposal: &Proposal) -> ShareToken {
    let payload = serde_json::json!({
        "from": proposal.sender_name(),
        "to": proposal.receiver_name(),
        "email": proposal.sender_email().unwrap_or_default(),
        "phone": proposal.sender_phone().unwrap_or_default(),
        "g": proposal.gender().as_str(),
    });
    ShareToken(URL_SAFE.encode(payload.to_string()))
}

/// Decode a share token, or `None` if it does not hold a complete proposal.
#[must_use]
pub fn decode(token: &str) -> Option<Proposal> {
    match try_decode(token) {
        Ok(proposal) => Some(proposal),
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring shared token");
            None
        }
    }
}

/// Decode a share token, keeping the reason for rejection.
pub fn try_decode(token: &str) -> Result<Proposal, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(DecodeError::TooLong { len: token.len() });
    }

    let bytes = decode_bytes(token)?;
    let wire: WirePayload = serde_json::from_slice(&bytes)?;
    Proposal::try_from(wire)
}

fn decode_bytes(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE.decode(token).or_else(|err| {
        // Form decoding of a query string turns `+` into a space.
        let restored = token.replace(' ', "+");
        STANDARD.decode(restored).map_err(|_| err)
    })
}
