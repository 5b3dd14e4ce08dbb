use crate::errors::Result;
use crate::reports::report_model::MonthlyReport;

/// Trait for report service operations
pub trait ReportServiceTrait: Send + Sync {
    /// Builds the report for `month` (`YYYY-MM`).
    fn get_monthly_report(&self, user_id: &str, month: &str) -> Result<MonthlyReport>;
    fn export_monthly_report_csv(&self, user_id: &str, month: &str) -> Result<String>;
}
