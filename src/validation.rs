//! Sanitizing and checking form input before it reaches the database.
//!
//! Text fields are trimmed, checked against a length range and then
//! HTML-escaped. The escaped text is what gets stored and echoed back into
//! forms, so [EscapedText] renders verbatim instead of being escaped again.
//!
//! Every rule of every field is checked so that the user sees all problems
//! with a submission at once.

use std::{fmt::Display, sync::OnceLock};

use maud::Render;
use regex::Regex;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use unicode_segmentation::UnicodeSegmentation;

/// Text that has been trimmed and HTML-escaped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EscapedText(String);

impl EscapedText {
    /// Trim `raw` and escape any characters with special meaning in HTML.
    pub fn sanitize(raw: &str) -> Self {
        Self(escape_html(raw.trim()))
    }

    /// Wrap text that is already escaped, e.g. a value read back from the database.
    ///
    /// The caller should ensure that the text was produced by [EscapedText::sanitize].
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the invariant is violated it will cause incorrect rendering but not affect memory safety.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The escaped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EscapedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Render for EscapedText {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.0);
    }
}

impl ToSql for EscapedText {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for EscapedText {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(EscapedText::new_unchecked)
    }
}

/// Replace the characters `& < > " ' / \` and the backtick with HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// A rule that a form field violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// The name of the form field.
    pub field: &'static str,
    /// The message to show the user.
    pub message: &'static str,
}

/// All the rules violated by a form submission, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The messages for every violated rule.
    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|error| error.message)
    }

    /// Whether any rule for `field` was violated.
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

/// A form submission that failed validation.
///
/// `values` holds the sanitized values to pre-fill the form with when it is
/// displayed again.
#[derive(Debug, PartialEq)]
pub struct InvalidForm<T> {
    pub values: T,
    pub errors: ValidationErrors,
}

/// Length bounds for a text field, counted in graphemes after trimming.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub min_length: usize,
    pub max_length: Option<usize>,
    pub message: &'static str,
}

impl TextRule {
    /// Sanitize `raw`, recording an error for `field` if the trimmed text is out of bounds.
    ///
    /// The sanitized text is returned even when the rule is violated.
    pub fn apply(&self, field: &'static str, raw: &str, errors: &mut ValidationErrors) -> EscapedText {
        let length = raw.trim().graphemes(true).count();
        let too_long = self.max_length.is_some_and(|max| length > max);

        if length < self.min_length || too_long {
            errors.push(field, self.message);
        }

        EscapedText::sanitize(raw)
    }
}

/// The largest price an item may have, in cents.
pub const MAX_PRICE_CENTS: i64 = 99_999;

/// A price in whole cents.
///
/// Prices are stored as integers so that values such as 2.99 survive a round
/// trip through the database unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Create a price from a whole number of cents, e.g. 299 for 2.99.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The price in whole cents.
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl ToSql for Price {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Price {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_i64().map(Price)
    }
}

pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_DECIMAL_PLACES: &str = "Price must have maximum of two decimal places";
pub const PRICE_RANGE: &str = "Price must be between 0 and 1000";

fn price_pattern() -> &'static Regex {
    static PRICE_PATTERN: OnceLock<Regex> = OnceLock::new();

    PRICE_PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("price pattern is valid"))
}

/// Check the price field, returning the trimmed text to echo back and the
/// parsed price if every rule passed.
pub fn validate_price(
    field: &'static str,
    raw: Option<&str>,
    errors: &mut ValidationErrors,
) -> (String, Option<Price>) {
    let Some(raw) = raw else {
        errors.push(field, PRICE_REQUIRED);
        return (String::new(), None);
    };

    let matches_pattern = price_pattern().is_match(raw);
    if !matches_pattern {
        errors.push(field, PRICE_DECIMAL_PLACES);
    }

    let in_range = raw
        .parse::<f64>()
        .is_ok_and(|value| value.is_finite() && (0.0..=999.99).contains(&value));
    if !in_range {
        errors.push(field, PRICE_RANGE);
    }

    let price = if matches_pattern && in_range {
        parse_cents(raw)
            .filter(|cents| *cents <= MAX_PRICE_CENTS)
            .map(Price)
    } else {
        None
    };

    (raw.trim().to_owned(), price)
}

/// Convert text matching the price pattern into whole cents.
fn parse_cents(text: &str) -> Option<i64> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let whole = whole.parse::<i64>().ok()?;
    let fraction = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}

/// The largest stock amount an item may have.
pub const MAX_AMOUNT: u32 = 10_000;

pub const AMOUNT_REQUIRED: &str = "Amount is required";
pub const AMOUNT_RANGE: &str = "Amount must be an integer with between 0 and 10000";

fn integer_pattern() -> &'static Regex {
    static INTEGER_PATTERN: OnceLock<Regex> = OnceLock::new();

    INTEGER_PATTERN
        .get_or_init(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer pattern is valid"))
}

/// Check the amount field, returning the parsed amount if every rule passed.
pub fn validate_amount(
    field: &'static str,
    raw: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<u32> {
    let Some(raw) = raw else {
        errors.push(field, AMOUNT_REQUIRED);
        return None;
    };

    let amount = integer_pattern()
        .is_match(raw)
        .then(|| raw.parse::<i64>().ok())
        .flatten()
        .filter(|amount| (0..=MAX_AMOUNT as i64).contains(amount))
        .and_then(|amount| u32::try_from(amount).ok());

    if amount.is_none() {
        errors.push(field, AMOUNT_RANGE);
    }

    amount
}
