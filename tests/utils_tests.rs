// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kopilka::utils::{
    format_currency, format_date, format_percent, validate_amount, validate_code, validate_email,
    validate_password, validate_required,
};
use rust_decimal::Decimal;

#[test]
fn email_validation() {
    assert!(validate_email("user@example.com"));
    assert!(validate_email("a.b+tag@sub.domain.org"));
    assert!(!validate_email("user@example"));
    assert!(!validate_email("not an email"));
    assert!(!validate_email("@example.com"));
    assert!(!validate_email(""));
}

#[test]
fn password_validation() {
    assert!(validate_password("secret"));
    assert!(validate_password("123456"));
    assert!(!validate_password("12345"));
    assert!(!validate_password(""));
}

#[test]
fn amount_validation() {
    assert!(validate_amount("12.50"));
    assert!(validate_amount("1"));
    assert!(validate_amount(" 3.14 "));
    assert!(!validate_amount("-5"));
    assert!(!validate_amount("0"));
    assert!(!validate_amount("abc"));
    assert!(!validate_amount(""));
}

#[test]
fn code_validation() {
    assert!(validate_code("123456"));
    assert!(validate_code("000000"));
    assert!(!validate_code("12345"));
    assert!(!validate_code("1234567"));
    assert!(!validate_code("12345a"));
    assert!(!validate_code(""));
}

#[test]
fn required_validation() {
    assert!(validate_required("x"));
    assert!(!validate_required(""));
    assert!(!validate_required("   "));
}

#[test]
fn currency_grouping_and_decimals() {
    let amount = "1234.5".parse::<Decimal>().unwrap();
    assert_eq!(format_currency(amount, false), "1\u{a0}234,5\u{a0}₽");

    let amount = "1234567.89".parse::<Decimal>().unwrap();
    assert_eq!(format_currency(amount, false), "1\u{a0}234\u{a0}567,89\u{a0}₽");

    assert_eq!(format_currency(Decimal::ZERO, false), "0\u{a0}₽");
    assert_eq!(
        format_currency("999".parse().unwrap(), false),
        "999\u{a0}₽"
    );
}

#[test]
fn currency_rounds_to_two_places() {
    let amount = "10.005".parse::<Decimal>().unwrap();
    // Banker's rounding lands on the even digit.
    assert_eq!(format_currency(amount, false), "10\u{a0}₽");
    let amount = "10.015".parse::<Decimal>().unwrap();
    assert_eq!(format_currency(amount, false), "10,02\u{a0}₽");
}

#[test]
fn currency_sign_handling() {
    let amount = "50".parse::<Decimal>().unwrap();
    assert_eq!(format_currency(amount, true), "+50\u{a0}₽");
    assert_eq!(format_currency(amount, false), "50\u{a0}₽");
    assert_eq!(format_currency(-amount, true), "-50\u{a0}₽");
    assert_eq!(format_currency(-amount, false), "-50\u{a0}₽");
    assert_eq!(format_currency(Decimal::ZERO, true), "0\u{a0}₽");
}

#[test]
fn percent_formatting() {
    assert_eq!(format_percent(25.0, 1), "25.0%");
    assert_eq!(format_percent(33.333, 0), "33%");
    assert_eq!(format_percent(f64::NAN, 1), "0%");
    assert_eq!(format_percent(f64::INFINITY, 1), "0%");
}

#[test]
fn date_formatting() {
    let d = chrono::NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(format_date(d), "07.03.2025");
}
