//! Analytics - pure reports over a record snapshot
//!
//! Every function here takes already-fetched records and returns a new
//! derived value. Nothing reads storage or the wall clock; time-dependent
//! reports take `now` explicitly.
//!
//! - `aggregate` - Per-category and income/expense sums
//! - `budget` - Budget progress with under/near/exceeded status
//! - `monthly` - Monthly report with month-over-month comparison
//! - `trend` - N-month income/expense series
//! - `cashflow` - Day-by-day calendar for one month

pub mod aggregate;
pub mod budget;
pub mod cashflow;
pub mod monthly;
pub mod trend;
pub mod types;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::models::TransactionType;
use crate::store::Snapshot;

pub use aggregate::{aggregate_by_category, income_expense_totals};
pub use budget::budgets_with_progress;
pub use cashflow::cashflow_calendar;
pub use monthly::monthly_report;
pub use trend::trend_series;
pub use types::{
    BudgetComparison, BudgetProgressReport, BudgetStatus, BudgetWithProgress, CashflowCalendar,
    CashflowDay, CategoryBreakdown, CategoryTotal, CutDown, IncomeExpenseTotals,
    MonthOverMonthSaving, MonthlyReport, TrendPoint,
};

/// Everything the monthly overview shows, computed from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPage {
    pub report: MonthlyReport,
    pub category_breakdown: CategoryBreakdown,
    pub trend: Vec<TrendPoint>,
    pub cashflow: CashflowCalendar,
    pub totals: IncomeExpenseTotals,
}

/// Build every panel of the monthly overview for `snapshot.month`.
///
/// The trend ends at the month the snapshot was taken in, not the viewed month.
pub fn monthly_page(snapshot: &Snapshot, config: &AnalyticsConfig) -> MonthlyPage {
    let records = &snapshot.transactions;
    let month = snapshot.month;

    let page = MonthlyPage {
        report: monthly_report(records, &snapshot.budgets, month, &config.report),
        category_breakdown: aggregate_by_category(records, month, TransactionType::Expense),
        trend: trend_series(records, snapshot.taken_at, config.report.trend_months),
        cashflow: cashflow_calendar(records, month),
        totals: income_expense_totals(records, month),
    };

    debug!(
        month = %month,
        categories = page.category_breakdown.data.len(),
        trend_months = page.trend.len(),
        "Monthly page built"
    );
    page
}
