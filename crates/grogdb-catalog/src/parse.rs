//! Low-level numeric extraction from free-text catalogue fields.
//!
//! Every helper returns `None` rather than an error; callers decide whether a
//! miss is worth recording as a [`crate::issues::ConversionIssue`].

use std::sync::LazyLock;

use regex::Regex;

static FIRST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").expect("valid number regex"));

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)").expect("valid leading number regex")
});

static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit run regex"));

/// Parses a whole field as a finite number, ignoring surrounding whitespace.
///
/// `"1.4"` → `1.4`, `" 12 "` → `12.0`; `"1.4 drinks"`, `"NaN"` → `None`.
#[must_use]
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns the first integer or decimal anywhere in `text`.
///
/// `"375mL"` → `375.0`, `"Bottle 1.25L"` → `1.25`.
#[must_use]
pub(crate) fn first_number(text: &str) -> Option<f64> {
    FIRST_NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Returns the first run of digits anywhere in `text` as a count.
///
/// `"Case of 24"` → `24`, `"2 cases for $90"` → `2`.
#[must_use]
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    DIGIT_RUN_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Returns the number `text` starts with, after leading whitespace.
///
/// `"4.8%"` → `4.8`, `"0.048% Alc/Vol"` → `0.048`, `"Approx 5%"` → `None`.
#[must_use]
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER_RE
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Returns the last run of exactly three digits in `text`.
///
/// Digit runs are maximal, so `"1000"` never yields `100`, while `"6X375mL"`
/// yields `375` because letters do not extend a run.
#[must_use]
pub(crate) fn last_three_digit_run(text: &str) -> Option<f64> {
    DIGIT_RUN_RE
        .find_iter(text)
        .filter(|m| m.as_str().len() == 3)
        .last()
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Rounds half away from zero to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Two prices are the same when they agree to the cent.
#[must_use]
pub(crate) fn same_price(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
