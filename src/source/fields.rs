//! Tolerant field access over raw JSON records.
//!
//! A wrongly-typed field reads as absent instead of failing the record.
//! Monetary values are the exception: a present but non-numeric amount is
//! reported as `Amount::Malformed` so it can be logged.

use serde_json::{Map, Value};

use crate::model::Money;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Amount {
    Absent,
    Present(Money),
    Malformed,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// `null` reads as absent.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string, or a number rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.raw(key).and_then(value_text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.raw(key).and_then(value_number)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        let v = self.raw(key)?;
        v.as_i64().or_else(|| {
            let f = value_number(v)?;
            (f.fract() == 0.0).then_some(f as i64)
        })
    }

    pub fn nested(&self, key: &str) -> Option<Fields<'a>> {
        self.raw(key).and_then(Fields::of)
    }

    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.raw(key).and_then(|v| v.as_array()).map(|a| a.as_slice())
    }

    pub fn amount(&self, key: &str) -> Amount {
        match self.raw(key) {
            None => Amount::Absent,
            Some(v) => decode_amount(v),
        }
    }
}

pub(crate) fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn value_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Accepts the legacy bare number and the `{amount, currency}` object
/// (`currencyCode` is accepted as an alias).
pub(crate) fn decode_amount(v: &Value) -> Amount {
    match v {
        Value::Null => Amount::Absent,
        Value::Number(_) | Value::String(_) => match value_number(v) {
            Some(n) => Amount::Present(Money::bare(n)),
            None => Amount::Malformed,
        },
        Value::Object(obj) => {
            let amount = match obj.get("amount") {
                None | Some(Value::Null) => return Amount::Absent,
                Some(a) => match value_number(a) {
                    Some(n) => n,
                    None => return Amount::Malformed,
                },
            };
            let currency = obj
                .get("currency")
                .or_else(|| obj.get("currencyCode"))
                .and_then(|c| c.as_str())
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned);
            Amount::Present(Money { amount, currency })
        }
        Value::Bool(_) | Value::Array(_) => Amount::Malformed,
    }
}
