use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use familybudget_core::{
    budget::{BudgetService, BudgetServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    incomes::{IncomeService, IncomeServiceTrait},
    members::{MemberService, MemberServiceTrait},
    reports::{ReportService, ReportServiceTrait},
};
use familybudget_storage_sqlite::{
    db::{self, DbPool},
    BudgetRepository, ExpenseRepository, GoalRepository, IncomeRepository, MemberRepository,
};

pub struct AppState {
    pub income_service: Arc<dyn IncomeServiceTrait + Send + Sync>,
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub report_service: Arc<dyn ReportServiceTrait + Send + Sync>,
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub member_service: Arc<dyn MemberServiceTrait + Send + Sync>,
    pub pool: Arc<DbPool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Output format from `FB_LOG_FORMAT`, after loading `.env`.
pub fn log_format() -> LogFormat {
    dotenvy::dotenv().ok();
    match std::env::var("FB_LOG_FORMAT") {
        Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

pub fn init_tracing() {
    // Loads `.env`; must run before `RUST_LOG` is read.
    let log_format = log_format();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` so repeated calls (tests) do not panic.
    let result = if log_format == LogFormat::Json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let income_repository = Arc::new(IncomeRepository::new(pool.clone(), writer.clone()));
    let expense_repository = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let member_repository = Arc::new(MemberRepository::new(pool.clone(), writer));

    let income_service = Arc::new(IncomeService::new(income_repository.clone()));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repository.clone(),
        member_repository.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(budget_repository.clone()));
    let report_service = Arc::new(ReportService::new(
        income_repository,
        expense_repository,
        budget_repository,
    ));
    let goal_service = Arc::new(GoalService::new(goal_repository));
    let member_service = Arc::new(MemberService::new(member_repository));

    tracing::info!("Application state ready (database: {})", db_path);

    Ok(Arc::new(AppState {
        income_service,
        expense_service,
        budget_service,
        report_service,
        goal_service,
        member_service,
        pool,
    }))
}
