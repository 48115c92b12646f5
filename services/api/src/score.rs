use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{validate_payload, PointsBreakdown, Receipt, ScoringEngine};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    pub(crate) path: PathBuf,
    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { path, json } = args;

    let raw = std::fs::read_to_string(&path)?;
    let (receipt, breakdown) = score_source(&raw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render_breakdown(&receipt, &breakdown));
    }

    Ok(())
}

pub(crate) fn score_source(raw: &str) -> Result<(Receipt, PointsBreakdown), AppError> {
    let payload: serde_json::Value = serde_json::from_str(raw)?;
    let receipt = validate_payload(payload)?;
    let breakdown = ScoringEngine::new().score(&receipt);
    Ok((receipt, breakdown))
}

pub(crate) fn render_breakdown(receipt: &Receipt, breakdown: &PointsBreakdown) -> String {
    let mut lines = vec![format!(
        "{} | {} {} | {} items | total {}",
        receipt.retailer(),
        receipt.purchase_date(),
        receipt.purchase_time().format("%H:%M"),
        receipt.items().len(),
        receipt.total()
    )];
    lines.extend(breakdown.components.iter().map(|component| {
        format!(
            "- {}: {} ({})",
            component.rule.label(),
            component.points,
            component.notes
        )
    }));
    lines.push(format!("Total points: {}", breakdown.total));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
