use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::domain::{Item, ItemSubmission, Money, Receipt, ReceiptSubmission};

/// Rejection raised when a submitted payload cannot become a [`Receipt`].
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("payload does not match the receipt schema: {0}")]
    Malformed(String),
    #[error("retailer must be non-empty and must not start with whitespace")]
    Retailer,
    #[error("purchaseDate '{0}' is not a calendar date in YYYY-MM-DD form")]
    PurchaseDate(String),
    #[error("purchaseTime '{0}' is not a 24-hour HH:MM time")]
    PurchaseTime(String),
    #[error("{field} '{value}' must be a non-negative amount with exactly two decimals")]
    Amount { field: String, value: String },
    #[error("items[{index}].shortDescription '{value}' may only contain word characters, whitespace, and hyphens")]
    ShortDescription { index: usize, value: String },
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static pattern compiles"))
}

fn amount_pattern() -> &'static Regex {
    static AMOUNT: OnceLock<Regex> = OnceLock::new();
    pattern(&AMOUNT, r"^([0-9]+)\.([0-9]{2})$")
}

fn description_pattern() -> &'static Regex {
    static DESCRIPTION: OnceLock<Regex> = OnceLock::new();
    pattern(&DESCRIPTION, r"^[\w\s\-]+$")
}

fn date_pattern() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    pattern(&DATE, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
}

fn time_pattern() -> &'static Regex {
    static TIME: OnceLock<Regex> = OnceLock::new();
    pattern(&TIME, r"^[0-9]{2}:[0-9]{2}$")
}

/// Validate an untyped JSON payload and build a [`Receipt`] from it.
pub fn validate_payload(payload: serde_json::Value) -> Result<Receipt, ValidationError> {
    let submission: ReceiptSubmission = serde_json::from_value(payload)
        .map_err(|err| ValidationError::Malformed(err.to_string()))?;
    validate_submission(submission)
}

/// Apply every field format check; the first violation rejects the whole receipt.
pub fn validate_submission(submission: ReceiptSubmission) -> Result<Receipt, ValidationError> {
    let ReceiptSubmission {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    } = submission;

    if retailer.trim().is_empty() || retailer.starts_with(char::is_whitespace) {
        return Err(ValidationError::Retailer);
    }

    let purchase_date = parse_purchase_date(&purchase_date)?;
    let purchase_time = parse_purchase_time(&purchase_time)?;

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let total = parse_amount("total", &total)?;

    Ok(Receipt::new(
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    ))
}

fn validate_item(index: usize, item: ItemSubmission) -> Result<Item, ValidationError> {
    let ItemSubmission {
        short_description,
        price,
    } = item;

    if !description_pattern().is_match(&short_description) {
        return Err(ValidationError::ShortDescription {
            index,
            value: short_description,
        });
    }

    let price = parse_amount(&format!("items[{index}].price"), &price)?;
    Ok(Item::new(short_description, price))
}

pub(crate) fn parse_purchase_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    if !date_pattern().is_match(raw) {
        return Err(ValidationError::PurchaseDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::PurchaseDate(raw.to_string()))
}

pub(crate) fn parse_purchase_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    if !time_pattern().is_match(raw) {
        return Err(ValidationError::PurchaseTime(raw.to_string()));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ValidationError::PurchaseTime(raw.to_string()))
}

pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<Money, ValidationError> {
    let invalid = || ValidationError::Amount {
        field: field.to_string(),
        value: raw.to_string(),
    };

    let captures = amount_pattern().captures(raw).ok_or_else(invalid)?;
    let dollars: u64 = captures[1].parse().map_err(|_| invalid())?;
    let cents: u64 = captures[2].parse().map_err(|_| invalid())?;

    dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .map(Money::from_cents)
        .ok_or_else(invalid)
}
