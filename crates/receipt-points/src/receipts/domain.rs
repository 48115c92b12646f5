use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier handed back on submission and used for points lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Fresh random (v4) identifier in hyphenated textual form.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative amount in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub(crate) fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn is_whole_dollars(self) -> bool {
        self.0 % 100 == 0
    }

    pub fn is_multiple_of(self, cents: u64) -> bool {
        cents != 0 && self.0 % cents == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// One validated line entry on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    short_description: String,
    price: Money,
}

impl Item {
    pub(crate) fn new(short_description: String, price: Money) -> Self {
        Self {
            short_description,
            price,
        }
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

/// A receipt that passed validation. Only the validator constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    retailer: String,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
    items: Vec<Item>,
    total: Money,
}

impl Receipt {
    pub(crate) fn new(
        retailer: String,
        purchase_date: NaiveDate,
        purchase_time: NaiveTime,
        items: Vec<Item>,
        total: Money,
    ) -> Self {
        Self {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        }
    }

    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

/// Raw receipt payload as it arrives over the wire, before any format checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSubmission {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<ItemSubmission>,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmission {
    pub short_description: String,
    pub price: String,
}

/// Points recorded for a single accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ReceiptId,
    pub points: u64,
}
