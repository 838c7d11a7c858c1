//! Business rules the application enforces, as pure functions.
//!
//! Page objects use these to derive expected outcomes, and the offline tests
//! check them without a browser.

use crate::content::top_up;
use rand::Rng;
use std::ops::RangeInclusive;

/// Minimum length of identifier and password
pub const MIN_CREDENTIAL_LEN: usize = 8;

/// Digits in a domestic account number
pub const ACCOUNT_NUMBER_DIGITS: usize = 26;

/// Sign-in is enabled iff both fields have at least 8 characters
#[must_use]
pub fn sign_in_allowed(user_id: &str, password: &str) -> bool {
    user_id.chars().count() >= MIN_CREDENTIAL_LEN && password.chars().count() >= MIN_CREDENTIAL_LEN
}

/// Error the login screen shows for a field value, if any
#[must_use]
pub fn credential_error(value: &str, too_short: &'static str) -> Option<&'static str> {
    match value.chars().count() {
        0 => Some(crate::content::REQUIRED_FIELD),
        n if n < MIN_CREDENTIAL_LEN => Some(too_short),
        _ => None,
    }
}

// =============================================================================
// TOP-UP LIMITS
// =============================================================================

/// Amount rule for a phone top-up recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopUpLimit {
    /// Free amount within an inclusive range
    Range(RangeInclusive<u32>),
    /// Amount picked from a fixed list
    Fixed,
}

impl TopUpLimit {
    /// Rule for a recipient label such as `"503 xxx xxx"`
    #[must_use]
    pub fn for_recipient(label: &str) -> Self {
        match label.trim().get(..3) {
            Some("503") => Self::Range(5..=500),
            Some("504") => Self::Fixed,
            _ => Self::Range(5..=150),
        }
    }

    /// Range for free-amount recipients
    #[must_use]
    pub const fn range(&self) -> Option<&RangeInclusive<u32>> {
        match self {
            Self::Range(range) => Some(range),
            Self::Fixed => None,
        }
    }

    /// Message for an amount above the ceiling
    #[must_use]
    pub fn too_high_message(&self) -> Option<&'static str> {
        match self.range().map(|r| *r.end()) {
            Some(500) => Some(top_up::AMOUNT_TOO_HIGH_500),
            Some(_) => Some(top_up::AMOUNT_TOO_HIGH_150),
            None => None,
        }
    }

    /// Amount hint shown for the recipient
    #[must_use]
    pub fn tooltip(&self) -> Option<&'static str> {
        match self.range().map(|r| *r.end()) {
            Some(500) => Some(top_up::TOOLTIP_500),
            Some(_) => Some(top_up::TOOLTIP_150),
            None => None,
        }
    }

    /// Verdict for an amount
    #[must_use]
    pub fn classify(&self, amount: u32) -> AmountVerdict {
        match self.range() {
            Some(range) if amount < *range.start() => AmountVerdict::TooLow,
            Some(range) if amount > *range.end() => AmountVerdict::TooHigh,
            _ => AmountVerdict::Valid,
        }
    }

    /// Error message for an amount, `None` when accepted
    #[must_use]
    pub fn message_for(&self, amount: u32) -> Option<&'static str> {
        match self.classify(amount) {
            AmountVerdict::TooLow => Some(top_up::AMOUNT_TOO_LOW),
            AmountVerdict::TooHigh => self.too_high_message(),
            AmountVerdict::Valid => None,
        }
    }
}

/// Outcome of validating a top-up amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountVerdict {
    /// Below the minimum
    TooLow,
    /// Accepted
    Valid,
    /// Above the maximum
    TooHigh,
}

/// One amount to type and the verdict the form should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryProbe {
    /// Amount to enter
    pub amount: u32,
    /// Expected verdict
    pub verdict: AmountVerdict,
}

/// Amounts around the edges of a range: `min-1`, `min`, a midpoint, `max`,
/// `max+1`. `min-1` is omitted when `min` is zero.
#[must_use]
pub fn boundary_probes(range: &RangeInclusive<u32>) -> Vec<BoundaryProbe> {
    let (min, max) = (*range.start(), *range.end());
    let mut probes = Vec::with_capacity(5);
    if let Some(below) = min.checked_sub(1) {
        probes.push(BoundaryProbe {
            amount: below,
            verdict: AmountVerdict::TooLow,
        });
    }
    probes.push(BoundaryProbe {
        amount: min,
        verdict: AmountVerdict::Valid,
    });
    let mid = min + (max - min) / 2;
    if mid != min && mid != max {
        probes.push(BoundaryProbe {
            amount: mid,
            verdict: AmountVerdict::Valid,
        });
    }
    if max != min {
        probes.push(BoundaryProbe {
            amount: max,
            verdict: AmountVerdict::Valid,
        });
    }
    if let Some(above) = max.checked_add(1) {
        probes.push(BoundaryProbe {
            amount: above,
            verdict: AmountVerdict::TooHigh,
        });
    }
    probes
}

// =============================================================================
// ACCOUNT NUMBERS
// =============================================================================

/// A valid account number is exactly 26 ASCII digits
#[must_use]
pub fn is_valid_account_number(value: &str) -> bool {
    value.len() == ACCOUNT_NUMBER_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

/// Random digit string of `len` digits with a non-zero leading digit
#[must_use]
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|i| {
            let low = u8::from(i == 0);
            char::from(b'0' + rng.gen_range(low..=9))
        })
        .collect()
}

/// Random valid account number
#[must_use]
pub fn random_account_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_digits(rng, ACCOUNT_NUMBER_DIGITS)
}
