//! Fixed two-fraction-digit decimals.
//!
//! Values are kept as integers scaled by 100 so that parsing, comparison and
//! summation are exact. Only the average ever leaves integer arithmetic.

use std::fmt;

/// A decimal number with exactly two fraction digits, stored as `value * 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(i64);

impl Decimal {
    pub const fn from_scaled(scaled: i64) -> Self {
        Decimal(scaled)
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    /// Parses `[-]D{1,3}.DD`. Anything else, including trailing bytes,
    /// yields `None`.
    pub fn parse(raw: &[u8]) -> Option<Decimal> {
        let (negative, digits) = match raw.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, raw),
        };

        // 1 to 3 integer digits, the dot, 2 fraction digits.
        if !(4..=6).contains(&digits.len()) {
            return None;
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - 3);
        if frac_part[0] != b'.' {
            return None;
        }

        let mut scaled: i32 = 0;
        for &byte in int_part.iter().chain(&frac_part[1..]) {
            let digit = byte.wrapping_sub(b'0');
            if digit > 9 {
                return None;
            }
            scaled = scaled * 10 + i32::from(digit);
        }

        if negative {
            scaled = -scaled;
        }
        Some(Decimal(i64::from(scaled)))
    }
}

impl std::ops::AddAssign for Decimal {
    fn add_assign(&mut self, rhs: Decimal) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}
