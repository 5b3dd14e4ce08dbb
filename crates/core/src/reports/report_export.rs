//! CSV export of the monthly transaction feed.

use csv::Writer;

use super::report_model::{MonthlyReport, ReportTransaction};
use crate::errors::{Error, Result};

pub const CSV_HEADER: [&str; 6] = [
    "type",
    "date",
    "amount",
    "label",
    "description",
    "payment_method",
];

const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the report's transactions as CSV in feed order.
///
/// `label` is the income source or the expense category name.
pub fn report_to_csv(report: &MonthlyReport) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for transaction in &report.transactions {
        let date = transaction.date().format(CSV_DATE_FORMAT).to_string();
        let amount = transaction.amount().normalize().to_string();
        let record: [&str; 6] = match transaction {
            ReportTransaction::Income {
                source,
                description,
                ..
            } => [
                transaction.kind(),
                &date,
                &amount,
                source,
                description.as_deref().unwrap_or_default(),
                "",
            ],
            ReportTransaction::Expense {
                category,
                description,
                payment_method,
                ..
            } => [
                transaction.kind(),
                &date,
                &amount,
                category,
                description.as_deref().unwrap_or_default(),
                payment_method.as_deref().unwrap_or_default(),
            ],
        };
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}
