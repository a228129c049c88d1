//! Locale-aware currency formatting.

use serde::Deserialize;
use std::str::FromStr;

/// Thousands-separator style.
///
/// `Indian` groups the last three digits, then pairs: 12,34,567.89.
/// `Western` groups in threes: 1,234,567.89.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    Indian,
    Western,
}

impl FromStr for DigitGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indian" => Ok(DigitGrouping::Indian),
            "western" => Ok(DigitGrouping::Western),
            _ => Err(format!("Invalid currency grouping: {}", s)),
        }
    }
}

/// Currency presentation settings for a locale/currency pair.
#[derive(Debug, Clone)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub grouping: DigitGrouping,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Indian Rupee with en-IN grouping, the default document currency.
    pub fn inr() -> Self {
        Self::new("₹", DigitGrouping::Indian)
    }

    /// Format an amount with symbol, separators and two decimals.
    /// Rounding to two decimals happens here and only here.
    pub fn format(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let rounded = format!("{:.2}", amount.abs());
        let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, "00"));
        let grouped = group_digits(int_part, self.grouping);

        if negative {
            format!("-{}{}.{}", self.symbol, grouped, frac_part)
        } else {
            format!("{}{}.{}", self.symbol, grouped, frac_part)
        }
    }
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let n = chars.len();
    if n <= 3 {
        return digits.to_string();
    }

    // Cut points measured from the right end of the integer part.
    let mut cuts = Vec::new();
    match grouping {
        DigitGrouping::Western => {
            let mut pos = 3;
            while pos < n {
                cuts.push(n - pos);
                pos += 3;
            }
        }
        DigitGrouping::Indian => {
            cuts.push(n - 3);
            let mut pos = 5;
            while pos < n {
                cuts.push(n - pos);
                pos += 2;
            }
        }
    }

    let mut out = String::with_capacity(n + cuts.len());
    for (i, c) in chars.iter().enumerate() {
        if cuts.contains(&i) && i != 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
