use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// Target length of a card number, digits only.
pub const CARD_NUMBER_LEN: usize = 16;
/// Maximum CVV length.
pub const CVV_MAX_LEN: usize = 4;
/// Minimum length of the cardholder name after trimming.
pub const HOLDER_MIN_LEN: usize = 3;

/// A single validation failure for one card field.
///
/// Violations are returned as data, never as `Err`, so the caller can show
/// the complete list at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Card details are required for card payments")]
    MissingDetails,
    #[error("Card number must be 16 digits")]
    NumberLength,
    #[error("Cardholder name must be at least 3 characters")]
    HolderTooShort,
    #[error("Expiry must be in MM/YY format")]
    ExpiryFormat,
    #[error("Card has expired")]
    Expired,
    #[error("CVV must be 3 or 4 digits")]
    CvvLength,
}

/// Payment instrument fields as entered by the user.
///
/// Transient by design: card details exist only long enough to pass
/// validation and are never serialized or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub holder: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Collects every violation against today's date. Empty means valid.
    pub fn validate(&self) -> Vec<Violation> {
        self.validate_at(Utc::now().date_naive())
    }

    /// Collects every violation, evaluating expiry against `today`.
    pub fn validate_at(&self, today: NaiveDate) -> Vec<Violation> {
        let mut violations = Vec::new();

        let number: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if number.len() != CARD_NUMBER_LEN || !number.chars().all(|c| c.is_ascii_digit()) {
            violations.push(Violation::NumberLength);
        }

        if self.holder.trim().chars().count() < HOLDER_MIN_LEN {
            violations.push(Violation::HolderTooShort);
        }

        match parse_expiry(&self.expiry) {
            Some((month, year)) => {
                // YY is interpreted as 20YY; the first of the expiry month
                // must not lie strictly before today.
                let expiry_month =
                    NaiveDate::from_ymd_opt(2000 + i32::from(year), u32::from(month), 1);
                if let Some(expiry_month) = expiry_month
                    && expiry_month < today
                {
                    violations.push(Violation::Expired);
                }
            }
            None => violations.push(Violation::ExpiryFormat),
        }

        let cvv_ok = (3..=CVV_MAX_LEN).contains(&self.cvv.len())
            && self.cvv.chars().all(|c| c.is_ascii_digit());
        if !cvv_ok {
            violations.push(Violation::CvvLength);
        }

        violations
    }
}

/// Parses `MM/YY` with month in [01, 12]. Returns None on any deviation.
fn parse_expiry(expiry: &str) -> Option<(u8, u8)> {
    let (mm, yy) = expiry.split_once('/')?;
    if mm.len() != 2 || yy.len() != 2 {
        return None;
    }
    if !mm.chars().all(|c| c.is_ascii_digit()) || !yy.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month: u8 = mm.parse().ok()?;
    let year: u8 = yy.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((month, year))
}

/// Normalizes a card number for display: digits only, at most 16, grouped by
/// four with single spaces. Idempotent, applied on every keystroke.
pub fn format_card_number(input: &str) -> String {
    let mut out = String::with_capacity(CARD_NUMBER_LEN + 3);
    for (i, digit) in input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_NUMBER_LEN)
        .enumerate()
    {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out
}

/// Normalizes an expiry as it is typed.
///
/// Keeps at most four digits. Once two digits exist they become the month
/// (clamped to "12"); the remaining digits become the year and the value is
/// rendered as `MM/YY`. Idempotent.
pub fn format_expiry(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).take(4).collect();
    if digits.len() < 2 {
        return digits.into_iter().collect();
    }
    let mut month: String = digits[..2].iter().collect();
    if month.parse::<u32>().map(|m| m > 12).unwrap_or(false) {
        month = "12".to_string();
    }
    let year: String = digits[2..].iter().collect();
    if year.is_empty() {
        month
    } else {
        format!("{month}/{year}")
    }
}

/// Truncates a CVV to its maximum length. No other transformation.
pub fn format_cvv(input: &str) -> String {
    input.chars().take(CVV_MAX_LEN).collect()
}
