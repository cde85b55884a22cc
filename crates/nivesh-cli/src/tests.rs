//! CLI helper tests

use chrono::NaiveDate;

use crate::commands::reports::resolve_period_from;
use crate::commands::{format_amount, parse_date_arg, truncate};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ========== Amount Formatting ==========

#[test]
fn test_format_amount_small() {
    assert_eq!(format_amount("₹", 0.0), "₹0.00");
    assert_eq!(format_amount("₹", 450.5), "₹450.50");
    assert_eq!(format_amount("₹", 999.0), "₹999.00");
}

#[test]
fn test_format_amount_indian_grouping() {
    assert_eq!(format_amount("₹", 1234.0), "₹1,234.00");
    assert_eq!(format_amount("₹", 123456.0), "₹1,23,456.00");
    assert_eq!(format_amount("₹", 1234567.89), "₹12,34,567.89");
    assert_eq!(format_amount("₹", 123456789.0), "₹12,34,56,789.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount("₹", -123456.0), "-₹1,23,456.00");
}

// ========== Date Parsing ==========

#[test]
fn test_parse_date_arg() {
    assert_eq!(parse_date_arg(Some("2026-08-05")).unwrap(), d(2026, 8, 5));
    assert!(parse_date_arg(Some("05/08/2026")).is_err());
    // None defaults to today, which at least parses
    assert!(parse_date_arg(None).is_ok());
}

// ========== Period Resolution ==========

#[test]
fn test_resolve_period_this_month() {
    let (from, to) = resolve_period_from(d(2026, 8, 7), "this-month").unwrap();
    assert_eq!(from, d(2026, 8, 1));
    assert_eq!(to, d(2026, 8, 7));
}

#[test]
fn test_resolve_period_last_month() {
    let (from, to) = resolve_period_from(d(2026, 8, 7), "last-month").unwrap();
    assert_eq!(from, d(2026, 7, 1));
    assert_eq!(to, d(2026, 7, 31));

    // January looks back across the year boundary
    let (from, to) = resolve_period_from(d(2026, 1, 15), "last-month").unwrap();
    assert_eq!(from, d(2025, 12, 1));
    assert_eq!(to, d(2025, 12, 31));
}

#[test]
fn test_resolve_period_this_year() {
    let (from, to) = resolve_period_from(d(2026, 8, 7), "this-year").unwrap();
    assert_eq!(from, d(2026, 1, 1));
    assert_eq!(to, d(2026, 8, 7));
}

#[test]
fn test_resolve_period_last_12_months() {
    let (from, to) = resolve_period_from(d(2026, 8, 7), "last-12-months").unwrap();
    assert_eq!(from, d(2025, 9, 1));
    assert_eq!(to, d(2026, 8, 7));
}

#[test]
fn test_resolve_period_unknown() {
    assert!(resolve_period_from(d(2026, 8, 7), "fortnight").is_err());
}

// ========== Truncation ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a rather long string", 10), "a rathe...");
}
