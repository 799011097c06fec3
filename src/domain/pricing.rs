use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Share of a package price due when the booking is made.
pub const DEPOSIT_RATE: Decimal = dec!(0.5);

/// A monetary amount in the studio's currency.
///
/// Wraps `rust_decimal::Decimal` so amounts never go through floating point.
/// `Display` renders it the way prices are shown to clients: thousands
/// separators and at most three fraction digits (`75,000`, `75,000.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.round_dp(3).normalize();
        let text = value.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if value.is_sign_negative() && !value.is_zero() {
            f.write_str("-")?;
        }
        f.write_str(&grouped)?;
        if let Some(frac_part) = frac_part {
            write!(f, ".{frac_part}")?;
        }
        Ok(())
    }
}

/// Reads the numeric value out of a display price such as `"MK 150,000"`.
///
/// Every non-digit character is dropped; anything that still does not parse
/// (no digits at all, or too many of them) counts as zero.
pub fn parse_price(display: &str) -> Money {
    let digits: String = display.chars().filter(char::is_ascii_digit).collect();
    digits
        .parse::<u64>()
        .map(|value| Money(Decimal::from(value)))
        .unwrap_or(Money::ZERO)
}

/// Deposit owed for a package listed at `display`.
pub fn deposit_for(display: &str) -> Money {
    Money((parse_price(display).0 * DEPOSIT_RATE).normalize())
}

/// Deposit formatted for display, e.g. `"MK 150,000"` gives `"75,000"`.
pub fn deposit_display(display: &str) -> String {
    deposit_for(display).to_string()
}
