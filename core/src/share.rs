//! Links in and out of the card: the shareable proposal link and the
//! messaging deep link used to answer.

use url::{Url, form_urlencoded};

use cupid_types::Gender;

use crate::{ShareToken, phone::canonicalize_phone, phrases};

/// Query parameter carrying the share token.
pub const TOKEN_PARAM: &str = "token";
/// Parameter name used by links from the first version of the card.
const LEGACY_TOKEN_PARAM: &str = "d";
/// Messaging service used for replies unless configured otherwise.
pub const DEFAULT_REPLY_HOST: &str = "wa.me";

/// Compose `origin + path + ?token=<token>`.
///
/// Any query or fragment already on `base` is dropped.
#[must_use]
pub fn share_url(base: &Url, token: &ShareToken) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(TOKEN_PARAM, token.as_str());
    url
}

/// Pull the share token out of whatever the recipient pasted or opened.
///
/// Accepts a full link, a bare query string (`?token=...`), or the token
/// itself. Returns `None` when a link carries no token.
#[must_use]
pub fn extract_token(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(input)
        && matches!(url.scheme(), "http" | "https" | "file")
    {
        return token_from_query(url.query()?);
    }

    if let Some((_, query)) = input.split_once('?') {
        return token_from_query(query);
    }

    Some(input.to_string())
}

fn token_from_query(query: &str) -> Option<String> {
    let mut legacy = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == TOKEN_PARAM {
            return Some(value.into_owned());
        }
        if key == LEGACY_TOKEN_PARAM && legacy.is_none() {
            legacy = Some(value.into_owned());
        }
    }
    legacy
}

/// Compose `https://<host>/<phone>?text=<reply>`.
///
/// The phone is canonicalized first. Returns `None` for a blank phone or a
/// host that does not form a valid URL.
#[must_use]
pub fn reply_url(host: &str, phone: &str, gender: Gender) -> Option<Url> {
    let phone = canonicalize_phone(phone);
    if phone.trim().is_empty() {
        return None;
    }

    let mut url = match Url::parse(&format!("https://{}/", host.trim())) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(host, error = %err, "Invalid reply host");
            return None;
        }
    };
    url.path_segments_mut().ok()?.pop_if_empty().push(&phone);
    url.query_pairs_mut()
        .append_pair("text", &phrases::reply_message(gender));
    Some(url)
}
