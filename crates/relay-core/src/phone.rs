//! Phone number normalization.
//!
//! Two policies coexist in the relay and are deliberately kept as separate
//! named functions so call sites cannot conflate them:
//!
//! - [`normalize_e164`] produces `+<digits>` keys. Used by the registry,
//!   the pending queues, and outbound destination validation.
//! - [`digits_only`] strips `+` characters. Used when echoing the provider's
//!   webhook sender/recipient ids, which arrive without a `+`.
//!
//! Mixing the policies causes silent registry lookup misses; the registry
//! normalizes every key it touches with [`normalize_e164`] at its boundary.

use crate::error::PhoneError;

/// Maximum number of digits in an E.164 number.
const MAX_DIGITS: usize = 15;

/// Normalize a raw phone string to `+<digits>` form.
///
/// ASCII whitespace and any existing `+` prefixes are stripped; the remainder
/// must be 1-15 digits with a leading digit of 1-9. Idempotent: feeding the
/// output back in returns the same value.
pub fn normalize_e164(raw: &str) -> Result<String, PhoneError> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let digits = compact.trim_start_matches('+');

    let mut chars = digits.chars();
    let valid = matches!(chars.next(), Some('1'..='9'))
        && chars.all(|c| c.is_ascii_digit())
        && digits.len() <= MAX_DIGITS;

    if !valid {
        return Err(PhoneError::InvalidFormat(raw.to_string()));
    }

    Ok(format!("+{digits}"))
}

/// Strip every `+` character from a raw id, leaving everything else intact.
///
/// Provider webhook ids arrive without a `+`; this keeps ids echoed back to
/// clients in the same shape the provider uses.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| *c != '+').collect()
}
