//! Card copy. The card speaks French.

use cupid_types::{DeclineCounter, DraftError, Gender, Proposal};

/// Labels the decline control cycles through as the recipient keeps trying.
pub const DECLINE_PHRASES: [&str; 8] = [
    "S'il te plaît ?",
    "Tu es sûre ?",
    "Vraiment ?",
    "Réfléchis encore !",
    "Je vais pleurer...",
    "Tu es méchante !",
    "Allez, dis oui !",
    "C'est ton dernier mot ?",
];

pub const DEFAULT_DECLINE_LABEL: &str = "Non";
pub const ACCEPT_LABEL: &str = "OUI !";
pub const LINK_COPIED: &str = "Lien copié dans le presse-papier !";
pub const COPY_FAILED: &str = "Copie impossible, recopie le lien affiché.";

#[must_use]
pub fn decline_label(declines: DeclineCounter) -> &'static str {
    declines
        .phrase_index(DECLINE_PHRASES.len())
        .map_or(DEFAULT_DECLINE_LABEL, |index| DECLINE_PHRASES[index])
}

/// "le Valentin" / "la Valentine".
#[must_use]
pub const fn valentine_with_article(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "le Valentin",
        Gender::Female => "la Valentine",
    }
}

#[must_use]
pub const fn valentine(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Valentin",
        Gender::Female => "Valentine",
    }
}

#[must_use]
pub const fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "HOMME",
        Gender::Female => "FEMME",
    }
}

/// The proposal itself, shown on the ask screen.
#[must_use]
pub fn question(proposal: &Proposal) -> String {
    format!(
        "{}, veux-tu être {} de {} ?",
        proposal.receiver_name(),
        valentine_with_article(proposal.gender()),
        proposal.sender_name()
    )
}

#[must_use]
pub fn celebration(proposal: &Proposal) -> String {
    format!(
        "{} & {} pour toujours !",
        proposal.sender_name(),
        proposal.receiver_name()
    )
}

/// Body of the email sent to the sender when the answer is yes.
#[must_use]
pub fn acceptance_message(receiver_name: &str) -> String {
    format!("{receiver_name} a dit OUI ! 🎉 C'est un match !")
}

/// Pre-filled text for the messaging reply.
#[must_use]
pub fn reply_message(gender: Gender) -> String {
    format!(
        "OUI ! J'ai dit OUI ! J'accepte d'être ta {} ! ❤️",
        valentine(gender)
    )
}

/// Shown when the setup or gender step refuses to advance.
#[must_use]
pub const fn guard_message(reason: DraftError) -> &'static str {
    match reason {
        DraftError::NamesMissing => "Remplis au moins les prénoms !",
        DraftError::SenderNameMissing => "Ton prénom est obligatoire !",
        DraftError::ReceiverNameMissing => "Son prénom est obligatoire !",
        DraftError::GenderUnset => "Choisis un genre !",
        DraftError::TooLong => "Ta demande est trop longue !",
    }
}
