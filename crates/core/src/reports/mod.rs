//! Monthly reports - aggregation of incomes, expenses and budget categories.

mod report_aggregator;
mod report_export;
mod report_model;
mod report_service;
mod report_traits;

pub use report_aggregator::compute_report;
pub use report_export::{report_to_csv, CSV_HEADER};
pub use report_model::{CategorySpending, MonthlyReport, ReportSummary, ReportTransaction};
pub use report_service::ReportService;
pub use report_traits::ReportServiceTrait;
