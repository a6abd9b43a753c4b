//! Display formatting: currency, percentages, dates, masked identifiers.
//!
//! Output follows en-GB conventions: comma thousands separators, symbol
//! before the amount, long dates as `5 March 1980`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::{FormatOptions, Precision};
use crate::model::Money;

/// Rendered for an absent or zero amount.
pub const PLACEHOLDER: &str = "-";

/// Rendered for an absent or zero percentage.
pub const ZERO_PERCENT: &str = "0%";

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Same formatter with a different precision.
    pub fn with_precision(&self, precision: Precision) -> Self {
        let mut options = self.options.clone();
        options.precision = precision;
        Self { options }
    }

    pub fn money(&self, money: Option<&Money>) -> String {
        let Some(money) = money else { return PLACEHOLDER.to_owned() };
        if !money.amount.is_finite() || money.is_zero() {
            return PLACEHOLDER.to_owned();
        }

        let code = money
            .currency
            .as_deref()
            .unwrap_or(&self.options.default_currency);
        let decimals = match self.options.precision {
            Precision::Whole => 0,
            Precision::SubUnit => 2,
        };
        let digits = group_digits(money.amount.abs(), decimals);
        let sign = if money.amount < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };

        match currency_symbol(code) {
            Some(symbol) => format!("{sign}{symbol}{digits}"),
            None => format!("{sign}{}\u{a0}{digits}", code.to_ascii_uppercase()),
        }
    }

    pub fn percent(&self, value: Option<f64>) -> String {
        match value {
            Some(v) if v != 0.0 && v.is_finite() => {
                // Ties go away from zero, not to even.
                let rounded = (v * 10.0).round() / 10.0;
                format!("{rounded:.1}%")
            }
            _ => ZERO_PERCENT.to_owned(),
        }
    }

    /// Long-form date. Absent or unparseable input renders empty.
    pub fn date(&self, raw: Option<&str>) -> String {
        match raw.and_then(parse_date) {
            Some(date) => date.format("%-d %B %Y").to_string(),
            None => {
                if let Some(raw) = raw {
                    tracing::debug!(raw, "unparseable date");
                }
                String::new()
            }
        }
    }

    /// Mask prefix plus the last four characters. Never the full identifier.
    pub fn masked(&self, identifier: &str) -> String {
        let tail: String = {
            let chars: Vec<char> = identifier.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };
        format!("{}{tail}", self.options.mask)
    }

    /// Plain quantity: grouped, up to three decimals, trailing zeros trimmed.
    pub fn number(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        let grouped = group_digits(value.abs(), 3);
        let trimmed = match grouped.split_once('.') {
            Some((int, frac)) => {
                let frac = frac.trim_end_matches('0');
                if frac.is_empty() { int.to_owned() } else { format!("{int}.{frac}") }
            }
            None => grouped,
        };
        if value < 0.0 && trimmed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            format!("-{trimmed}")
        } else {
            trimmed
        }
    }
}

/// Symbols as the en-GB locale prints them.
fn currency_symbol(code: &str) -> Option<&'static str> {
    Some(match code.to_ascii_uppercase().as_str() {
        "GBP" => "£",
        "EUR" => "€",
        "USD" => "US$",
        "JPY" => "JP¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "ILS" => "₪",
        "KRW" => "₩",
        "VND" => "₫",
        "MXN" => "MX$",
        "BRL" => "R$",
        _ => return None,
    })
}

/// Round half away from zero to `decimals` places and group the integer
/// part in thousands. `value` must be non-negative.
fn group_digits(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    let text = format!("{rounded:.decimals$}");
    let (int, frac) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3 + 4);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
