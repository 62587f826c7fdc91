// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ApiError;

const UA: &str = concat!(
    "kopilka/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/kopilka)"
);

pub fn http_client() -> Result<reqwest::blocking::Client, ApiError> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

// ---- validators (presence/format checks done before any request) ----

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_password(password: &str) -> bool {
    password.len() >= 6
}

/// A valid amount parses to a positive decimal.
pub fn validate_amount(amount: &str) -> bool {
    amount
        .trim()
        .parse::<Decimal>()
        .map(|d| d > Decimal::ZERO)
        .unwrap_or(false)
}

pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Email verification codes are exactly six digits.
pub fn validate_code(code: &str) -> bool {
    CODE_RE.is_match(code)
}

// ---- formatters ----

/// Format an amount as rubles, ru-RU style: thousands separated by
/// non-breaking spaces, comma decimals, at most two fraction digits.
/// The sign is preserved; `show_sign` adds a leading '+' for positive
/// amounts only.
pub fn format_currency(amount: Decimal, show_sign: bool) -> String {
    let rounded = amount.round_dp(2).normalize();
    let bare = rounded.abs().to_string();
    let (int_part, frac_part) = match bare.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (bare.as_str(), None),
    };
    let mut out = String::new();
    if rounded < Decimal::ZERO {
        out.push('-');
    } else if show_sign && rounded > Decimal::ZERO {
        out.push('+');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push(',');
        out.push_str(f);
    }
    out.push('\u{a0}');
    out.push('₽');
    out
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{:.*}%", decimals, value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            out.push('\u{a0}');
        }
        out.push(ch);
    }
    out
}

// ---- CLI output helpers ----

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
