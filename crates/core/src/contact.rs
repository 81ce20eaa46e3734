//! Contact point kinds, phone normalization, and vCard value escaping.
//!
//! Phone numbers are stored in E.164. The school's families are NANP
//! subscribers, so bare 10-digit numbers get a `+1` prefix; anything already
//! carrying a `+` country code passes through after digit validation.

use crate::error::CoreError;

pub const KIND_EMAIL: &str = "EMAIL";
pub const KIND_PHONE: &str = "PHONE";
pub const KIND_WHATSAPP: &str = "WHATSAPP";
pub const VALID_CONTACT_KINDS: &[&str] = &[KIND_EMAIL, KIND_PHONE, KIND_WHATSAPP];

/// Validate that `kind` is one of the allowed contact kinds.
pub fn validate_contact_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_CONTACT_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid contact kind '{kind}'. Must be one of: {}",
            VALID_CONTACT_KINDS.join(", ")
        )))
    }
}

/// Normalize a phone number to E.164, or `None` if it cannot be one.
///
/// - 10 digits: assumed NANP, prefixed with `+1`.
/// - 11 digits starting with `1`: NANP with country code, prefixed with `+`.
/// - Input starting with `+` and 8..=15 total digits: kept as `+<digits>`.
/// - Anything else (empty, too short, letters-only): `None`.
///
/// Separators, parentheses, and whitespace are ignored.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let has_plus = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if has_plus {
        return match digits.len() {
            8..=15 => Some(format!("+{digits}")),
            _ => None,
        };
    }

    match digits.len() {
        10 => Some(format!("+1{digits}")),
        11 if digits.starts_with('1') => Some(format!("+{digits}")),
        _ => None,
    }
}

/// Normalize an email address for matching: trimmed and lowercased.
///
/// Returns `None` when the value has no `@` or is empty around it.
pub fn normalize_email(raw: &str) -> Option<String> {
    let value = raw.trim().to_ascii_lowercase();
    let (local, domain) = value.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.ends_with('.') || !domain.contains('.') {
        return None;
    }
    Some(value)
}

/// Normalize a contact value according to its kind.
pub fn normalize_contact_value(kind: &str, raw: &str) -> Result<String, CoreError> {
    match kind {
        KIND_EMAIL => normalize_email(raw).ok_or_else(|| {
            CoreError::Validation(format!("'{raw}' is not a valid email address"))
        }),
        KIND_PHONE | KIND_WHATSAPP => normalize_phone(raw).ok_or_else(|| {
            CoreError::Validation(format!("'{raw}' is not a valid phone number"))
        }),
        other => Err(CoreError::Validation(format!(
            "Invalid contact kind '{other}'"
        ))),
    }
}

/// Escape a text value for embedding in a vCard property per RFC 6350:
/// `\`, `,`, `;`, and newline.
pub fn escape_vcard_value(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digit_input_gets_plus_one() {
        assert_eq!(normalize_phone("6125551234").as_deref(), Some("+16125551234"));
        assert_eq!(
            normalize_phone("(612) 555-1234").as_deref(),
            Some("+16125551234")
        );
    }

    #[test]
    fn eleven_digit_nanp_gets_plus() {
        assert_eq!(normalize_phone("16125551234").as_deref(), Some("+16125551234"));
    }

    #[test]
    fn plus_prefixed_international_passes_through() {
        assert_eq!(normalize_phone("+252 61 555 1234").as_deref(), Some("+252615551234"));
    }

    #[test]
    fn invalid_phone_yields_none() {
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("555-1234"), None);
        assert_eq!(normalize_phone("not a number"), None);
        assert_eq!(normalize_phone("+1"), None);
    }

    #[test]
    fn email_normalization_lowercases() {
        assert_eq!(
            normalize_email("  Parent@Example.COM ").as_deref(),
            Some("parent@example.com")
        );
        assert_eq!(normalize_email("nope"), None);
        assert_eq!(normalize_email("@example.com"), None);
        assert_eq!(normalize_email("a@"), None);
    }

    #[test]
    fn vcard_escapes_structural_characters() {
        assert_eq!(escape_vcard_value(r"a\b"), r"a\\b");
        assert_eq!(escape_vcard_value("a;b"), r"a\;b");
        assert_eq!(escape_vcard_value("a,b"), r"a\,b");
        assert_eq!(escape_vcard_value("a\nb"), r"a\nb");
    }

    #[test]
    fn vcard_leaves_plain_text_unchanged() {
        assert_eq!(escape_vcard_value("Khadija Ali"), "Khadija Ali");
    }
}
