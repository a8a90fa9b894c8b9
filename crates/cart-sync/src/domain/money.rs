//! Display Money
//!
//! Prices are only ever estimated client-side (line totals), so they are
//! kept as integer cents parsed from whatever the server rendered.

use std::sync::OnceLock;

use regex::Regex;

/// Amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money {
    cents: i64,
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d[\d.,]*").expect("amount pattern is valid"))
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Parse a localized price such as `"$10.00 c/u"`, `"$ 1.234,56 c/u"`
    /// or `"$1,234.56"`.
    ///
    /// With both separators present the last one is the decimal point. With
    /// a single kind, it is decimal only when it appears once and is followed
    /// by one or two digits.
    pub fn parse_localized(text: &str) -> Option<Self> {
        let amount = amount_pattern().find(text)?.as_str();
        let amount = amount.trim_end_matches(['.', ',']);

        let decimal_at = match (amount.rfind('.'), amount.rfind(',')) {
            (Some(dot), Some(comma)) => Some(dot.max(comma)),
            (Some(pos), None) | (None, Some(pos)) => {
                let sep = amount.as_bytes()[pos] as char;
                let single = amount.matches(sep).count() == 1;
                let tail = amount.len() - pos - 1;
                (single && (1..=2).contains(&tail)).then_some(pos)
            }
            (None, None) => None,
        };

        let (whole, fraction) = match decimal_at {
            Some(pos) => (&amount[..pos], &amount[pos + 1..]),
            None => (amount, ""),
        };

        let whole_digits: String = whole.chars().filter(char::is_ascii_digit).collect();
        let mut fraction_digits: String = fraction.chars().filter(char::is_ascii_digit).take(2).collect();
        while fraction_digits.len() < 2 {
            fraction_digits.push('0');
        }

        let whole: i64 = if whole_digits.is_empty() { 0 } else { whole_digits.parse().ok()? };
        let fraction: i64 = fraction_digits.parse().ok()?;
        whole.checked_mul(100)?.checked_add(fraction).map(Self::from_cents)
    }

    /// Multiply by a line quantity, `None` on overflow.
    pub fn times(self, quantity: u32) -> Option<Self> {
        self.cents.checked_mul(quantity as i64).map(Self::from_cents)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}
