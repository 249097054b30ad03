// 🪪 Patron Entity - validated library member record
//
// "ID is IDENTITY (never changes), name/address/fine are VALUES (can change)"
//
// A Patron can only exist in a valid state:
// - id is exactly 7 ASCII digits (leading zeros allowed)
// - fine is a decimal in [0.00, 250.00]
// - name and address are free-form and stored verbatim

use crate::error::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FIELD RULES
// ============================================================================

/// Number of digits in a patron id
pub const ID_LENGTH: usize = 7;

/// Lowest allowed overdue fine (0.00)
pub const MIN_FINE: Decimal = Decimal::ZERO;

/// Highest allowed overdue fine (250.00)
pub const MAX_FINE: Decimal = Decimal::from_parts(25_000, 0, 0, false, 2);

/// Separator printed under every rendered patron
pub const RECORD_SEPARATOR: &str = "-----------------------------";

// Fractional digits kept from input; enough for any in-range fine to fit a Decimal
const MAX_FRACTION_DIGITS: usize = 25;

/// Check a raw patron id and return it trimmed
///
/// Rules, in order:
/// 1. not empty or whitespace-only
/// 2. exactly 7 characters after trimming
/// 3. digits only (no sign, no separators)
pub fn validate_id(raw: &str) -> Result<&str, ValidationError> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }

    if id.chars().count() != ID_LENGTH {
        return Err(ValidationError::WrongLength);
    }

    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumericId);
    }

    Ok(id)
}

/// Parse a raw overdue fine and check it is within [0.00, 250.00]
///
/// Accepts `[+-]digits[.digits]` with digits on at least one side of the point.
/// The value keeps the precision it was entered with.
pub fn validate_fine(raw: &str) -> Result<Decimal, ValidationError> {
    let text = raw.trim();

    if text.is_empty() {
        return Err(ValidationError::EmptyFine);
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(ValidationError::NotDecimalFine);
    }

    // Anything with four significant whole digits is at least 1000
    let significant_whole = whole.trim_start_matches('0');
    if significant_whole.len() > 3 {
        return Err(ValidationError::FineOutOfRange);
    }

    let (fraction, dropped) = fraction.split_at(fraction.len().min(MAX_FRACTION_DIGITS));
    // Non-zero dropped digits put the value strictly beyond the kept one
    let beyond_kept = dropped.chars().any(|c| c != '0');
    let canonical = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if significant_whole.is_empty() { "0" } else { significant_whole },
        if fraction.is_empty() { "0" } else { fraction },
    );

    let mut fine =
        Decimal::from_str(&canonical).map_err(|_| ValidationError::NotDecimalFine)?;

    // "-0.00" is zero, not a negative fine
    if fine.is_zero() {
        fine.set_sign_positive(true);
    }

    if fine < MIN_FINE || fine > MAX_FINE {
        return Err(ValidationError::FineOutOfRange);
    }

    if beyond_kept && (negative || fine == MAX_FINE) {
        return Err(ValidationError::FineOutOfRange);
    }

    Ok(fine)
}

/// Format a fine as currency with exactly two decimals (half away from zero)
pub fn format_fine(fine: Decimal) -> String {
    let mut rounded = fine.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${}", rounded)
}

// ============================================================================
// PATRON ENTITY
// ============================================================================

/// One library patron
///
/// Fields are private so the id stays immutable and the fine stays in range;
/// every mutation goes through a validating setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patron {
    /// 7-digit identity, the registry key
    id: String,

    name: String,

    address: String,

    /// Overdue fine as entered, always within [MIN_FINE, MAX_FINE]
    fine: Decimal,
}

impl Patron {
    /// Create a patron from raw input
    ///
    /// Validates the id first, then the fine. Name and address are stored as given.
    pub fn new(id: &str, name: &str, address: &str, fine: &str) -> Result<Self, ValidationError> {
        let id = validate_id(id)?;
        let fine = validate_fine(fine)?;

        Ok(Patron {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            fine,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn fine(&self) -> Decimal {
        self.fine
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.to_string();
    }

    /// Replace the fine, leaving the old value in place if the new one is invalid
    pub fn set_fine(&mut self, fine: &str) -> Result<(), ValidationError> {
        self.fine = validate_fine(fine)?;
        Ok(())
    }

    /// Four-line display block followed by the separator line
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}\nName: {}\nAddress: {}\nFine: {}\n{}",
            self.id,
            self.name,
            self.address,
            format_fine(self.fine),
            RECORD_SEPARATOR
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
