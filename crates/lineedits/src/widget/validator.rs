//! Validators for line edits.
//!
//! Validators are attached to a [`LineEdit`](super::widgets::LineEdit) to
//! constrain what the user can type. While editing, a keystroke that would
//! make the text [`ValidationState::Invalid`] is rejected; text that is
//! [`ValidationState::Intermediate`] is kept so the user can finish typing.
//!
//! # Built-in Validators
//!
//! - [`IntValidator`]: integer input within a range
//! - [`DoubleValidator`]: decimal input within a range, with limited decimals
//! - [`RegexValidator`]: input matching a regular expression
//! - [`HexColorValidator`]: a fixed `#RRGGBB` color format
//!
//! # Example
//!
//! ```
//! use lineedits::widget::validator::{IntValidator, ValidationState, Validator};
//!
//! let validator = IntValidator::new(0, 100);
//! assert_eq!(validator.validate("42"), ValidationState::Acceptable);
//! assert_eq!(validator.validate("150"), ValidationState::Invalid);
//! assert_eq!(validator.validate(""), ValidationState::Intermediate);
//! ```

use std::fmt;
use std::sync::Arc;

/// How far a piece of text is from being accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// The input is wrong and further typing cannot fix it.
    Invalid,
    /// The input is incomplete but could become valid.
    Intermediate,
    /// The input is valid as a final result.
    #[default]
    Acceptable,
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationState::Invalid => "Invalid",
            ValidationState::Intermediate => "Intermediate",
            ValidationState::Acceptable => "Acceptable",
        };
        f.write_str(name)
    }
}

/// Decides whether text is acceptable, and optionally repairs it.
///
/// Implementors are `Send + Sync` since widgets holding them are shared with
/// signal slots.
pub trait Validator: Send + Sync {
    /// Classify `input`.
    fn validate(&self, input: &str) -> ValidationState;

    /// Attempt to repair input that is not acceptable.
    ///
    /// Called when editing finishes. Returns `None` when no repair applies.
    fn fixup(&self, _input: &str) -> Option<String> {
        None
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, input: &str) -> ValidationState {
        (**self).validate(input)
    }

    fn fixup(&self, input: &str) -> Option<String> {
        (**self).fixup(input)
    }
}

/// Splits a leading `+`/`-` off `input`.
fn split_sign(input: &str) -> (Option<char>, &str) {
    match input.chars().next() {
        Some(sign @ ('+' | '-')) => (Some(sign), &input[1..]),
        _ => (None, input),
    }
}

/// Validator for integer input within `[minimum, maximum]`.
///
/// A value below a non-negative minimum is intermediate as long as it has
/// fewer digits than the maximum, since more digits could bring it in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntValidator {
    minimum: i64,
    maximum: i64,
}

impl IntValidator {
    /// Create a validator for the given inclusive range. Bounds are swapped
    /// if given in the wrong order.
    pub fn new(minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
        }
    }

    fn max_digits(&self) -> usize {
        self.minimum
            .unsigned_abs()
            .max(self.maximum.unsigned_abs())
            .to_string()
            .len()
    }
}

impl Validator for IntValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        let (sign, digits) = split_sign(trimmed);

        if sign == Some('-') && self.minimum >= 0 {
            return ValidationState::Invalid;
        }
        if digits.is_empty() {
            return ValidationState::Intermediate;
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return ValidationState::Invalid;
        }
        if digits.len() > self.max_digits() {
            return ValidationState::Invalid;
        }

        let Ok(value) = trimmed.parse::<i64>() else {
            return ValidationState::Invalid;
        };

        if (self.minimum..=self.maximum).contains(&value) {
            ValidationState::Acceptable
        } else if value >= 0 && value < self.minimum && digits.len() < self.max_digits() {
            ValidationState::Intermediate
        } else {
            ValidationState::Invalid
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let value = input.trim().parse::<i64>().ok()?;
        let clamped = value.clamp(self.minimum, self.maximum);
        (clamped != value).then(|| clamped.to_string())
    }
}

/// Validator for decimal input within `[minimum, maximum]` with at most
/// `decimals` digits after the point.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleValidator {
    minimum: f64,
    maximum: f64,
    decimals: u32,
}

impl DoubleValidator {
    /// Create a validator for the given inclusive range and precision.
    pub fn new(minimum: f64, maximum: f64, decimals: u32) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum: minimum.max(maximum),
            decimals,
        }
    }
}

impl Validator for DoubleValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        let (sign, number) = split_sign(trimmed);

        if sign == Some('-') && self.minimum >= 0.0 {
            return ValidationState::Invalid;
        }

        let (int_part, frac_part) = match number.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (number, None),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(int_part) || !frac_part.is_none_or(all_digits) {
            return ValidationState::Invalid;
        }
        if frac_part.is_some_and(|f| f.len() > self.decimals as usize) {
            return ValidationState::Invalid;
        }
        if frac_part.is_some() && self.decimals == 0 {
            return ValidationState::Invalid;
        }

        // "", "-", ".", "12." are all on the way to a number.
        if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
            return ValidationState::Intermediate;
        }
        if frac_part == Some("") {
            return ValidationState::Intermediate;
        }

        let Ok(value) = trimmed.parse::<f64>() else {
            return ValidationState::Invalid;
        };
        if !value.is_finite() {
            return ValidationState::Invalid;
        }

        if value >= self.minimum && value <= self.maximum {
            ValidationState::Acceptable
        } else if value >= 0.0 && value < self.minimum {
            ValidationState::Intermediate
        } else {
            ValidationState::Invalid
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        let value = trimmed.trim_end_matches('.').parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }

        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped != value || trimmed.ends_with('.') {
            Some(format!("{:.prec$}", clamped, prec = self.decimals as usize))
        } else {
            None
        }
    }
}

/// Validator that matches input against a regular expression.
///
/// Without an intermediate pattern every non-matching input is treated as
/// intermediate, since a plain regex cannot tell a prefix from garbage.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: regex::Regex,
    intermediate_pattern: Option<regex::Regex>,
}

impl RegexValidator {
    /// Create a validator from a pattern string.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
            intermediate_pattern: None,
        })
    }

    /// Create a validator with a second pattern recognizing partial input.
    /// Input matching neither pattern is invalid.
    pub fn with_intermediate(
        pattern: &str,
        intermediate_pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
            intermediate_pattern: Some(regex::Regex::new(intermediate_pattern)?),
        })
    }

    /// Source of the acceptable-input pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Validator for RegexValidator {
    fn validate(&self, input: &str) -> ValidationState {
        if input.is_empty() {
            return ValidationState::Intermediate;
        }
        if self.pattern.is_match(input) {
            return ValidationState::Acceptable;
        }
        match &self.intermediate_pattern {
            Some(intermediate) if intermediate.is_match(input) => ValidationState::Intermediate,
            Some(_) => ValidationState::Invalid,
            None => ValidationState::Intermediate,
        }
    }
}

/// Validator for the fixed `#RRGGBB` color format.
///
/// The leading `#` is optional while typing; [`fixup`](Validator::fixup)
/// adds it and uppercases the digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexColorValidator;

impl HexColorValidator {
    const DIGITS: usize = 6;

    /// Create a new hex color validator.
    pub fn new() -> Self {
        Self
    }

    /// Parse `#RRGGBB` (or `RRGGBB`) into its channels.
    pub fn parse_rgb(input: &str) -> Option<(u8, u8, u8)> {
        let hex = input.trim().strip_prefix('#').unwrap_or(input.trim());
        if hex.len() != Self::DIGITS || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Validator for HexColorValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) || hex.len() > Self::DIGITS {
            ValidationState::Invalid
        } else if hex.len() == Self::DIGITS {
            ValidationState::Acceptable
        } else {
            ValidationState::Intermediate
        }
    }

    fn fixup(&self, input: &str) -> Option<String> {
        let (r, g, b) = Self::parse_rgb(input)?;
        let formatted = format!("#{r:02X}{g:02X}{b:02X}");
        (formatted != input).then_some(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_validator_range() {
        let validator = IntValidator::new(0, 100);
        assert_eq!(validator.validate("0"), ValidationState::Acceptable);
        assert_eq!(validator.validate("100"), ValidationState::Acceptable);
        assert_eq!(validator.validate("+7"), ValidationState::Acceptable);
        assert_eq!(validator.validate("101"), ValidationState::Invalid);
        assert_eq!(validator.validate("1000"), ValidationState::Invalid);
        assert_eq!(validator.validate("-1"), ValidationState::Invalid);
        assert_eq!(validator.validate("-"), ValidationState::Invalid);
    }

    #[test]
    fn test_int_validator_intermediate() {
        let validator = IntValidator::new(-100, 100);
        assert_eq!(validator.validate(""), ValidationState::Intermediate);
        assert_eq!(validator.validate("-"), ValidationState::Intermediate);
        assert_eq!(validator.validate("+"), ValidationState::Intermediate);

        let validator = IntValidator::new(10, 100);
        assert_eq!(validator.validate("5"), ValidationState::Intermediate);
    }

    #[test]
    fn test_int_validator_rejects_non_digits() {
        let validator = IntValidator::new(-9999, 9999);
        assert_eq!(validator.validate("abc"), ValidationState::Invalid);
        assert_eq!(validator.validate("12.5"), ValidationState::Invalid);
        assert_eq!(validator.validate("1e5"), ValidationState::Invalid);
        assert_eq!(validator.validate("--1"), ValidationState::Invalid);
    }

    #[test]
    fn test_int_validator_swapped_bounds() {
        let validator = IntValidator::new(100, -100);
        assert_eq!(validator, IntValidator::new(-100, 100));
        assert_eq!(validator.validate("-100"), ValidationState::Acceptable);
    }

    #[test]
    fn test_int_validator_fixup() {
        let validator = IntValidator::new(0, 100);
        assert_eq!(validator.fixup("-50"), Some("0".to_string()));
        assert_eq!(validator.fixup("150"), Some("100".to_string()));
        assert_eq!(validator.fixup("50"), None);
        assert_eq!(validator.fixup("x"), None);
    }

    #[test]
    fn test_double_validator() {
        let validator = DoubleValidator::new(-999.0, 999.0, 2);
        assert_eq!(validator.validate("3.14"), ValidationState::Acceptable);
        assert_eq!(validator.validate("-999"), ValidationState::Acceptable);
        assert_eq!(validator.validate(".5"), ValidationState::Acceptable);
        assert_eq!(validator.validate("3."), ValidationState::Intermediate);
        assert_eq!(validator.validate("-"), ValidationState::Intermediate);
        assert_eq!(validator.validate("."), ValidationState::Intermediate);
        assert_eq!(validator.validate(""), ValidationState::Intermediate);
        assert_eq!(validator.validate("3.141"), ValidationState::Invalid);
        assert_eq!(validator.validate("1000"), ValidationState::Invalid);
        assert_eq!(validator.validate("1.2.3"), ValidationState::Invalid);
        assert_eq!(validator.validate("abc"), ValidationState::Invalid);
    }

    #[test]
    fn test_double_validator_non_negative() {
        let validator = DoubleValidator::new(1.0, 10.0, 1);
        assert_eq!(validator.validate("-1"), ValidationState::Invalid);
        assert_eq!(validator.validate("0.5"), ValidationState::Intermediate);
        assert_eq!(validator.validate("11"), ValidationState::Invalid);
    }

    #[test]
    fn test_double_validator_fixup() {
        let validator = DoubleValidator::new(0.0, 100.0, 2);
        assert_eq!(validator.fixup("150"), Some("100.00".to_string()));
        assert_eq!(validator.fixup("5."), Some("5.00".to_string()));
        assert_eq!(validator.fixup("5.5"), None);
    }

    #[test]
    fn test_regex_validator() {
        let validator =
            RegexValidator::with_intermediate(r"^[A-Z]{3}-[0-9]{4}$", r"^[A-Z]{0,3}(-[0-9]{0,4})?$")
                .unwrap();
        assert_eq!(validator.validate("ABC-1234"), ValidationState::Acceptable);
        assert_eq!(validator.validate("AB"), ValidationState::Intermediate);
        assert_eq!(validator.validate("ABC-12"), ValidationState::Intermediate);
        assert_eq!(validator.validate("abc"), ValidationState::Invalid);
        assert_eq!(validator.pattern(), r"^[A-Z]{3}-[0-9]{4}$");
    }

    #[test]
    fn test_regex_validator_without_intermediate() {
        let validator = RegexValidator::new(r"^\d+$").unwrap();
        assert_eq!(validator.validate("12"), ValidationState::Acceptable);
        assert_eq!(validator.validate("1a"), ValidationState::Intermediate);
        assert!(RegexValidator::new("(").is_err());
    }

    #[test]
    fn test_hex_color_validator() {
        let validator = HexColorValidator::new();
        assert_eq!(validator.validate("#FF8800"), ValidationState::Acceptable);
        assert_eq!(validator.validate("ff8800"), ValidationState::Acceptable);
        assert_eq!(validator.validate("#"), ValidationState::Intermediate);
        assert_eq!(validator.validate("#FF8"), ValidationState::Intermediate);
        assert_eq!(validator.validate("#FF88001"), ValidationState::Invalid);
        assert_eq!(validator.validate("#GG0000"), ValidationState::Invalid);
    }

    #[test]
    fn test_hex_color_fixup() {
        let validator = HexColorValidator::new();
        assert_eq!(validator.fixup("ff8800"), Some("#FF8800".to_string()));
        assert_eq!(validator.fixup("#FF8800"), None);
        assert_eq!(validator.fixup("#FF8"), None);
        assert_eq!(HexColorValidator::parse_rgb("#0A10FF"), Some((10, 16, 255)));
    }

    #[test]
    fn test_shared_validator_delegates() {
        let shared: Arc<dyn Validator> = Arc::new(IntValidator::new(0, 9));
        assert_eq!(shared.validate("5"), ValidationState::Acceptable);
        assert_eq!(shared.fixup("12"), Some("9".to_string()));
    }
}
