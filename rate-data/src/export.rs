use std::io::Write;

use rate_core::{FreelanceRepository, RepositoryError, SavedCalculation, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

pub const CALCULATION_HEADERS: [&str; 8] = [
    "Date",
    "Hourly Rate",
    "Daily Rate",
    "Monthly Rate",
    "Currency",
    "Skill Level",
    "Industry",
    "Location",
];

/// Extra trailing column, present only when some calculation has skills.
pub const SELECTED_SKILLS_HEADER: &str = "Selected Skills";

pub const TRANSACTION_HEADERS: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Writes saved calculations as CSV, one row per calculation.
///
/// Keys (skill level, industry, location) are written as their stable
/// identifiers, e.g. `web-development`. A missing location is an empty cell.
pub struct CalculationExporter;

impl CalculationExporter {
    /// Write `records` to `writer`, returning the number of data rows.
    pub fn write<W: Write>(
        writer: W,
        records: &[SavedCalculation],
    ) -> Result<usize, ExportError> {
        let with_skills = records
            .iter()
            .any(|r| !r.inputs.selected_skills.is_empty());

        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = CALCULATION_HEADERS.to_vec();
        if with_skills {
            header.push(SELECTED_SKILLS_HEADER);
        }
        csv_writer.write_record(&header)?;

        for record in records {
            let inputs = &record.inputs;
            let mut row = vec![
                record.date.format(DATE_FORMAT).to_string(),
                money(record.results.hourly),
                money(record.results.daily),
                money(record.results.monthly),
                record.results.currency.code().to_string(),
                inputs
                    .skill_level
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
                inputs
                    .industry
                    .map(|i| i.as_str().to_string())
                    .unwrap_or_default(),
                inputs
                    .location
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_default(),
            ];
            if with_skills {
                let skills: Vec<&str> = inputs.selected_skills.iter().map(String::as_str).collect();
                row.push(skills.join("; "));
            }
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(records.len())
    }

    /// Export every saved calculation in `repo`.
    pub async fn export<R, W>(
        repo: &R,
        writer: W,
    ) -> Result<usize, ExportError>
    where
        R: FreelanceRepository + ?Sized,
        W: Write,
    {
        let records = repo.list_saved_calculations().await?;
        Self::write(writer, &records)
    }
}

/// Writes ledger transactions as CSV.
pub struct TransactionExporter;

impl TransactionExporter {
    /// Write `transactions` to `writer`, returning the number of data rows.
    pub fn write<W: Write>(
        writer: W,
        transactions: &[Transaction],
    ) -> Result<usize, ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(TRANSACTION_HEADERS)?;

        for transaction in transactions {
            csv_writer.write_record([
                transaction.date.format(DATE_FORMAT).to_string(),
                transaction.kind.as_str().to_string(),
                transaction.category.clone().unwrap_or_default(),
                money(transaction.amount),
                transaction.description.clone().unwrap_or_default(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(transactions.len())
    }

    /// Export every transaction in `repo`.
    pub async fn export<R, W>(
        repo: &R,
        writer: W,
    ) -> Result<usize, ExportError>
    where
        R: FreelanceRepository + ?Sized,
        W: Write,
    {
        let transactions = repo.list_transactions().await?;
        Self::write(writer, &transactions)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rate_core::calculations::compute_rate;
    use rate_core::{Currency, Industry, Location, RateInputs, SkillLevel, TransactionKind};
    use rust_decimal_macros::dec;

    use super::*;

    fn calculation(skills: &[&str]) -> SavedCalculation {
        let inputs = RateInputs {
            skill_level: Some(SkillLevel::Intermediate),
            industry: Some(Industry::WebDevelopment),
            location: Some(Location::WesternEurope),
            desired_annual_income: Some(dec!(104000)),
            currency: Currency::Eur,
            selected_skills: skills.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            ..Default::default()
        };
        let results = compute_rate(&inputs).unwrap();
        SavedCalculation {
            inputs,
            results,
            date: Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 0).unwrap(),
        }
    }

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn calculations_without_skills_have_eight_columns() {
        let mut out = Vec::new();

        let rows = CalculationExporter::write(&mut out, &[calculation(&[])]).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(
            to_string(out),
            "Date,Hourly Rate,Daily Rate,Monthly Rate,Currency,Skill Level,Industry,Location\n\
             2025-06-30,59.38,475.00,9500.00,EUR,intermediate,web-development,western-europe\n"
        );
    }

    #[test]
    fn any_skills_add_selected_skills_column() {
        let mut out = Vec::new();

        CalculationExporter::write(&mut out, &[calculation(&[]), calculation(&["React", "Node.js"])])
            .unwrap();

        let text = to_string(out);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with(",Location,Selected Skills"));
        assert!(lines[1].ends_with(",western-europe,"));
        assert!(lines[2].ends_with(",western-europe,Node.js; React"));
    }

    #[test]
    fn empty_calculation_list_writes_header_only() {
        let mut out = Vec::new();

        let rows = CalculationExporter::write(&mut out, &[]).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(to_string(out).lines().count(), 1);
    }

    #[test]
    fn transactions_quote_descriptions_with_commas() {
        let transactions = vec![
            Transaction {
                id: 1,
                kind: TransactionKind::Income,
                amount: dec!(1500),
                date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                category: Some("Client Project".to_string()),
                description: Some("Landing page, phase 1".to_string()),
            },
            Transaction {
                id: 2,
                kind: TransactionKind::Expense,
                amount: dec!(9.5),
                date: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
                category: None,
                description: None,
            },
        ];
        let mut out = Vec::new();

        TransactionExporter::write(&mut out, &transactions).unwrap();

        assert_eq!(
            to_string(out),
            "Date,Type,Category,Amount,Description\n\
             2025-02-03,income,Client Project,1500.00,\"Landing page, phase 1\"\n\
             2025-02-04,expense,,9.50,\n"
        );
    }
}
