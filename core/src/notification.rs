use cupid_types::Proposal;

use crate::phrases;

/// What the notification collaborator is asked to deliver when the answer is yes.
///
/// The recipient of the email is the person who sent the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient_name: String,
    pub recipient_email: String,
    pub sender_name: String,
    pub message: String,
}

impl Notification {
    /// `None` when the sender left no email address.
    #[must_use]
    pub fn for_acceptance(proposal: &Proposal) -> Option<Self> {
        let email = proposal.sender_email()?;
        Some(Self {
            recipient_name: proposal.sender_name().to_string(),
            recipient_email: email.to_string(),
            sender_name: proposal.receiver_name().to_string(),
            message: phrases::acceptance_message(proposal.receiver_name()),
        })
    }
}
