//! Donation receipts and annual giving statements.
//!
//! Everything here is pure formatting: callers fetch the rows, pick the donor
//! label with [`crate::core::donation::donor_label`], and print the result.

use crate::{config::settings::ChurchConfig, entities::donation};
use chrono::Datelike;
use serde::Serialize;
use std::fmt::Write;

/// Formats an amount with a currency symbol and two decimals, e.g. `"$1,250.00"`.
#[must_use]
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Receipt number derived from the donation year and id, e.g. `R-2024-000042`.
#[must_use]
pub fn receipt_number(donation: &donation::Model) -> String {
    format!("R-{}-{:06}", donation.donation_date.year(), donation.id)
}

fn push_header(out: &mut String, church: &ChurchConfig, title: &str) {
    let rule = "=".repeat(40);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", church.name);
    if let Some(address) = &church.address {
        let _ = writeln!(out, "{address}");
    }
    if let Some(tax_id) = &church.tax_id {
        let _ = writeln!(out, "Registration: {tax_id}");
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out);
}

/// Renders a single-donation receipt.
#[must_use]
pub fn render_donation_receipt(
    church: &ChurchConfig,
    donation: &donation::Model,
    donor: &str,
) -> String {
    let mut out = String::new();
    push_header(&mut out, church, "DONATION RECEIPT");

    let _ = writeln!(out, "Receipt No: {}", receipt_number(donation));
    let _ = writeln!(out, "Date:       {}", donation.donation_date.format("%B %-d, %Y"));
    let _ = writeln!(out, "Donor:      {donor}");
    let _ = writeln!(
        out,
        "Amount:     {}",
        format_currency(&church.currency_symbol, donation.amount)
    );
    if let Some(kind) = &donation.donation_type {
        let _ = writeln!(out, "Type:       {}", crate::analytics::category::format_category_name(kind));
    }
    if let Some(method) = &donation.payment_method {
        let _ = writeln!(out, "Method:     {}", crate::analytics::category::format_category_name(method));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Thank you for your generosity.");
    out
}

/// One donor's giving for a calendar year.
#[derive(Debug, Clone, Serialize)]
pub struct GivingStatement {
    /// Donor label
    pub donor: String,
    /// Calendar year covered
    pub year: i32,
    /// Number of gifts
    pub gift_count: usize,
    /// Sum of all gifts, rounded to cents
    pub total: f64,
    /// Gifts in date order
    pub gifts: Vec<donation::Model>,
}

/// Collects the donations dated in `year` into a statement.
#[must_use]
pub fn annual_statement(donor: &str, year: i32, donations: &[donation::Model]) -> GivingStatement {
    let mut gifts: Vec<donation::Model> = donations
        .iter()
        .filter(|d| d.donation_date.year() == year)
        .cloned()
        .collect();
    gifts.sort_by_key(|d| (d.donation_date, d.id));

    let total = crate::analytics::round2(gifts.iter().map(|d| d.amount).sum());

    GivingStatement {
        donor: donor.to_string(),
        year,
        gift_count: gifts.len(),
        total,
        gifts,
    }
}

/// Renders a giving statement as plain text.
#[must_use]
pub fn render_statement(church: &ChurchConfig, statement: &GivingStatement) -> String {
    let mut out = String::new();
    push_header(
        &mut out,
        church,
        &format!("GIVING STATEMENT {}", statement.year),
    );

    let _ = writeln!(out, "Donor: {}", statement.donor);
    let _ = writeln!(out);
    for gift in &statement.gifts {
        let _ = writeln!(
            out,
            "{}  {:>14}  {}",
            gift.donation_date.format("%Y-%m-%d"),
            format_currency(&church.currency_symbol, gift.amount),
            receipt_number(gift)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total ({} gifts): {}",
        statement.gift_count,
        format_currency(&church.currency_symbol, statement.total)
    );
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::date;

    fn gift(id: i64, amount: f64, year: i32, month: u32) -> donation::Model {
        donation::Model {
            id,
            amount,
            member_id: None,
            donor_name: Some("Joanna".to_string()),
            donor_email: None,
            donation_date: date(year, month, 1),
            donation_type: Some("building_fund".to_string()),
            payment_method: Some("card".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("$", 0.0), "$0.00");
        assert_eq!(format_currency("$", 12.5), "$12.50");
        assert_eq!(format_currency("$", 1250.0), "$1,250.00");
        assert_eq!(format_currency("€", 1_234_567.891), "€1,234,567.89");
        assert_eq!(format_currency("$", -40.0), "-$40.00");
    }

    #[test]
    fn test_receipt_number() {
        assert_eq!(receipt_number(&gift(42, 1.0, 2024, 3)), "R-2024-000042");
    }

    #[test]
    fn test_render_receipt() {
        let church = ChurchConfig {
            name: "Grace Chapel".to_string(),
            address: Some("1 Main St".to_string()),
            tax_id: None,
            currency_symbol: "$".to_string(),
        };
        let receipt = render_donation_receipt(&church, &gift(7, 250.0, 2024, 2), "Joanna");

        assert!(receipt.contains("Grace Chapel"));
        assert!(receipt.contains("1 Main St"));
        assert!(receipt.contains("Receipt No: R-2024-000007"));
        assert!(receipt.contains("Date:       February 1, 2024"));
        assert!(receipt.contains("Amount:     $250.00"));
        assert!(receipt.contains("Type:       Building fund"));
        assert!(!receipt.contains("Registration"));
    }

    #[test]
    fn test_annual_statement_filters_year() {
        let gifts = vec![
            gift(3, 10.1, 2024, 5),
            gift(1, 20.2, 2023, 12),
            gift(2, 30.3, 2024, 1),
        ];
        let statement = annual_statement("Joanna", 2024, &gifts);

        assert_eq!(statement.gift_count, 2);
        assert_eq!(statement.total, 40.4);
        assert_eq!(statement.gifts[0].id, 2);

        let text = render_statement(&ChurchConfig::default(), &statement);
        assert!(text.contains("GIVING STATEMENT 2024"));
        assert!(text.contains("Total (2 gifts): $40.40"));
    }
}
