//! Phone canonicalization for the reply deep link.
//!
//! Only the Cameroon numbering plan is handled, as a fixed list of rules.
//! This is best-effort formatting, not validation.

const CALLING_CODE: &str = "237";
const LOCAL_LEN: usize = 9;
const INTERNATIONAL_LEN: usize = CALLING_CODE.len() + LOCAL_LEN;
/// Mobile (6) and fixed-line (2) local numbers.
const LOCAL_LEADING_DIGITS: [char; 2] = ['6', '2'];

/// Rewrite free-form phone input into `+237XXXXXXXXX` when the rules allow.
///
/// 1. Nine digits starting with 6 or 2 get the `+237` prefix.
/// 2. Twelve digits starting with 237 get a `+`.
/// 3. Anything else is passed through, with a `+` added if missing.
///
/// Blank input is returned as-is.
#[must_use]
pub fn canonicalize_phone(input: &str) -> String {
    if input.trim().is_empty() {
        return input.to_string();
    }

    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == LOCAL_LEN && digits.starts_with(LOCAL_LEADING_DIGITS) {
        return format!("+{CALLING_CODE}{digits}");
    }
    if digits.len() == INTERNATIONAL_LEN && digits.starts_with(CALLING_CODE) {
        return format!("+{digits}");
    }

    if input.starts_with('+') {
        input.to_string()
    } else {
        format!("+{input}")
    }
}
