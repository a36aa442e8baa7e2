//! Domain logic for Cupid.
//!
//! Everything here is synchronous and free of IO apart from logging: the
//! share-token codec, phone canonicalization, the decline-evasion placement
//! and the flow controller that ties them together. Frontends drive a
//! [`FlowState`] and act on the [`Outcome`] of each transition.

pub mod codec;
pub mod evade;
pub mod flow;
mod notification;
pub mod phone;
pub mod phrases;
pub mod share;

pub use codec::{DecodeError, MAX_TOKEN_LEN, ShareToken};
pub use evade::{EvadeBounds, EvadeProfile, evade};
pub use flow::{FlowState, Outcome, Transition};
pub use notification::Notification;
pub use phone::canonicalize_phone;
pub use share::{DEFAULT_REPLY_HOST, TOKEN_PARAM, extract_token, reply_url, share_url};
