//! Receipt intake, loyalty points scoring, and points lookup.
//!
//! A raw payload flows through the validator into a [`Receipt`], the scoring engine turns it
//! into points, and the repository records the points under a freshly generated id.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Item, ItemSubmission, Money, Receipt, ReceiptId, ReceiptSubmission, ScoreRecord,
};
pub use repository::{InMemoryPointsRepository, PointsRepository, RepositoryError};
pub use router::receipt_router;
pub use scoring::{
    calculate_points, PointsBreakdown, RuleContribution, ScoringEngine, ScoringRule,
};
pub use service::{ReceiptPointsService, ReceiptServiceError};
pub use validation::{validate_payload, validate_submission, ValidationError};
