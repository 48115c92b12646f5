//! Loyalty points rules.
//!
//! Every rule is evaluated independently and the contributions are summed. Amounts are
//! handled in integer cents so the round-dollar, quarter, and item-price rules are exact.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use super::domain::Receipt;

const ROUND_DOLLAR_BONUS: u64 = 50;
const QUARTER_MULTIPLE_BONUS: u64 = 25;
const QUARTER_CENTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;
/// `ceil(price * 0.2)` in whole points is `ceil(cents / 500)`.
const CENTS_PER_DESCRIPTION_POINT: u64 = 500;
const ODD_DAY_BONUS: u64 = 6;
const AFTERNOON_BONUS: u64 = 10;
/// Exclusive bounds of the afternoon window, in minutes after midnight.
const AFTERNOON_OPENS: u32 = 14 * 60;
const AFTERNOON_CLOSES: u32 = 16 * 60;

/// Identifies which rule produced a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerAlphanumeric,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescriptionLength,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerAlphanumeric => "Retailer name",
            ScoringRule::RoundDollarTotal => "Round dollar total",
            ScoringRule::QuarterMultipleTotal => "Total is a multiple of 0.25",
            ScoringRule::ItemPairs => "Item pairs",
            ScoringRule::ItemDescriptionLength => "Item description length",
            ScoringRule::OddPurchaseDay => "Odd purchase day",
            ScoringRule::AfternoonPurchase => "Purchased between 14:00 and 16:00",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: ScoringRule,
    pub points: u64,
    pub notes: String,
}

/// Rule-by-rule result of scoring a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub components: Vec<RuleContribution>,
    pub total: u64,
}

/// Stateless scorer applying the fixed rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, receipt: &Receipt) -> PointsBreakdown {
        let components = vec![
            retailer_alphanumeric(receipt),
            round_dollar_total(receipt),
            quarter_multiple_total(receipt),
            item_pairs(receipt),
            item_description_length(receipt),
            odd_purchase_day(receipt),
            afternoon_purchase(receipt),
        ];
        let total = components
            .iter()
            .fold(0u64, |acc, component| acc.saturating_add(component.points));

        PointsBreakdown { components, total }
    }
}

/// Total points earned by a receipt.
pub fn calculate_points(receipt: &Receipt) -> u64 {
    ScoringEngine::new().score(receipt).total
}

fn retailer_alphanumeric(receipt: &Receipt) -> RuleContribution {
    let count = receipt
        .retailer()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as u64;
    RuleContribution {
        rule: ScoringRule::RetailerAlphanumeric,
        points: count,
        notes: format!("{count} alphanumeric characters in '{}'", receipt.retailer()),
    }
}

fn round_dollar_total(receipt: &Receipt) -> RuleContribution {
    let total = receipt.total();
    let (points, notes) = if total.is_whole_dollars() {
        (ROUND_DOLLAR_BONUS, format!("total {total} has no cents"))
    } else {
        (0, format!("total {total} has cents"))
    };
    RuleContribution {
        rule: ScoringRule::RoundDollarTotal,
        points,
        notes,
    }
}

fn quarter_multiple_total(receipt: &Receipt) -> RuleContribution {
    let total = receipt.total();
    let (points, notes) = if total.is_multiple_of(QUARTER_CENTS) {
        (QUARTER_MULTIPLE_BONUS, format!("total {total} is a multiple of 0.25"))
    } else {
        (0, format!("total {total} is not a multiple of 0.25"))
    };
    RuleContribution {
        rule: ScoringRule::QuarterMultipleTotal,
        points,
        notes,
    }
}

fn item_pairs(receipt: &Receipt) -> RuleContribution {
    let pairs = (receipt.items().len() / 2) as u64;
    RuleContribution {
        rule: ScoringRule::ItemPairs,
        points: pairs.saturating_mul(POINTS_PER_ITEM_PAIR),
        notes: format!("{pairs} pairs across {} items", receipt.items().len()),
    }
}

fn item_description_length(receipt: &Receipt) -> RuleContribution {
    let mut points: u64 = 0;
    let mut qualifying = 0usize;

    for item in receipt.items() {
        let trimmed = item.short_description().trim().chars().count();
        if trimmed > 0 && trimmed % DESCRIPTION_LENGTH_MULTIPLE == 0 {
            qualifying += 1;
            let earned = item.price().cents().div_ceil(CENTS_PER_DESCRIPTION_POINT);
            points = points.saturating_add(earned);
        }
    }

    RuleContribution {
        rule: ScoringRule::ItemDescriptionLength,
        points,
        notes: format!("{qualifying} items with a trimmed description length divisible by 3"),
    }
}

fn odd_purchase_day(receipt: &Receipt) -> RuleContribution {
    let day = receipt.purchase_date().day();
    RuleContribution {
        rule: ScoringRule::OddPurchaseDay,
        points: if day % 2 == 1 { ODD_DAY_BONUS } else { 0 },
        notes: format!("purchased on day {day}"),
    }
}

fn afternoon_purchase(receipt: &Receipt) -> RuleContribution {
    let time = receipt.purchase_time();
    let minute_of_day = time.hour() * 60 + time.minute();
    let within = minute_of_day > AFTERNOON_OPENS && minute_of_day < AFTERNOON_CLOSES;
    RuleContribution {
        rule: ScoringRule::AfternoonPurchase,
        points: if within { AFTERNOON_BONUS } else { 0 },
        notes: format!("purchased at {}", time.format("%H:%M")),
    }
}
