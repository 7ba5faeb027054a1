use std::fmt;

use rust_decimal::Decimal;

/// Money is kept as an exact base-10 decimal so that `4.50` stays `4.50`
/// and sums never pick up binary floating-point drift.
pub type Amount = Decimal;

/// Format an amount for display, keeping the scale it was entered with.
/// Example: 4.50 -> "4.50", -12 -> "-12"
pub fn format_amount(amount: Amount) -> String {
    amount.to_string()
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.00, "-12.5" -> -12.5, "+3" -> 3
///
/// Input that cannot be represented without rounding is rejected.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let digits = input.strip_prefix('+').unwrap_or(input);
    Decimal::from_str_exact(digits).map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(input) => {
                write!(f, "'{}' is not a valid decimal amount", input)
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}

/// A running total went past the largest amount a `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountOverflow;

impl fmt::Display for AmountOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total exceeds the largest supported amount")
    }
}

impl std::error::Error for AmountOverflow {}

/// Add two amounts, failing instead of panicking when the sum does not fit.
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount, AmountOverflow> {
    a.checked_add(b).ok_or(AmountOverflow)
}
