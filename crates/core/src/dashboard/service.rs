//! Dashboard aggregation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use super::types::{
    BudgetProgress, CashflowPoint, CategoryTotal, DailyTotal, Dashboard, MonthBucket, Summary,
    TopExpense,
};
use crate::budget::{Budget, BudgetService};
use crate::period::{MonthKey, PeriodFilter};
use crate::transaction::{Transaction, TransactionType};

/// Number of entries in the top lists.
const TOP_N: usize = 5;

/// Breakdown label for transactions without any category name.
const OTHER_CATEGORY: &str = "Other";

/// Dashboard service for business logic.
pub struct DashboardService;

impl DashboardService {
    /// Builds the full dashboard.
    ///
    /// `category_names` maps category IDs to names and is used to label
    /// expenses by their parent category. `year` defaults to the year of `now`.
    #[must_use]
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        category_names: &HashMap<Uuid, String>,
        filter: PeriodFilter,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Dashboard {
        let year = year.unwrap_or_else(|| now.year());
        let counted: Vec<&Transaction> = transactions.iter().filter(|t| t.amount > 0).collect();
        let in_period: Vec<&Transaction> = counted
            .iter()
            .copied()
            .filter(|t| filter.includes(t.date, now))
            .collect();

        Dashboard {
            period: filter,
            year,
            summary: Self::summary(&counted, &in_period),
            category_breakdown: Self::category_breakdown(&in_period, category_names),
            cashflow: Self::cashflow(&in_period),
            yearly: Self::yearly(&counted, year),
            top_expenses: Self::top_expenses(&in_period),
            daily_expense: Self::daily_expense(&in_period),
            budget_progress: Self::budget_progress(budgets, MonthKey::from_datetime(now)),
        }
    }

    fn totals(transactions: &[&Transaction]) -> (i64, i64) {
        transactions
            .iter()
            .fold((0i64, 0i64), |(income, expense), t| match t.transaction_type {
                TransactionType::Income => (income.saturating_add(t.amount), expense),
                TransactionType::Expense => (income, expense.saturating_add(t.amount)),
            })
    }

    /// Period totals plus the all-time balance.
    #[must_use]
    pub fn summary(all: &[&Transaction], in_period: &[&Transaction]) -> Summary {
        let (all_income, all_expense) = Self::totals(all);
        let (income, expense) = Self::totals(in_period);

        Summary {
            income,
            expense,
            balance: all_income.saturating_sub(all_expense),
        }
    }

    /// Expense totals keyed by parent category name, falling back to the
    /// category name and then `Other`.
    #[must_use]
    pub fn category_breakdown(
        in_period: &[&Transaction],
        category_names: &HashMap<Uuid, String>,
    ) -> Vec<CategoryTotal> {
        let mut totals: HashMap<String, i64> = HashMap::new();

        for t in in_period.iter().filter(|t| t.is_expense()) {
            let label = t
                .parent_category_id
                .and_then(|parent| category_names.get(&parent).cloned())
                .or_else(|| t.category_name.clone())
                .unwrap_or_else(|| OTHER_CATEGORY.to_string());
            let total = totals.entry(label).or_default();
            *total = total.saturating_add(t.amount);
        }

        let mut breakdown: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(name, total)| CategoryTotal { name, total })
            .collect();
        breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        breakdown
    }

    /// Running balance, one point per transaction in date order.
    #[must_use]
    pub fn cashflow(in_period: &[&Transaction]) -> Vec<CashflowPoint> {
        let mut ordered = in_period.to_vec();
        ordered.sort_by_key(|t| (t.date, t.created_at));

        let mut balance = 0i64;
        ordered
            .into_iter()
            .map(|t| {
                balance = match t.transaction_type {
                    TransactionType::Income => balance.saturating_add(t.amount),
                    TransactionType::Expense => balance.saturating_sub(t.amount),
                };
                CashflowPoint {
                    date: t.date,
                    balance,
                }
            })
            .collect()
    }

    /// Twelve monthly buckets for `year`, January first.
    #[must_use]
    pub fn yearly(all: &[&Transaction], year: i32) -> Vec<MonthBucket> {
        let mut buckets: Vec<MonthBucket> = (1..=12)
            .filter_map(|month| MonthKey::new(year, month).ok())
            .map(|month| MonthBucket {
                month,
                income: 0,
                expense: 0,
            })
            .collect();

        for t in all.iter().filter(|t| t.month.year() == year) {
            let Some(bucket) = buckets.iter_mut().find(|b| b.month == t.month) else {
                continue;
            };
            match t.transaction_type {
                TransactionType::Income => bucket.income = bucket.income.saturating_add(t.amount),
                TransactionType::Expense => {
                    bucket.expense = bucket.expense.saturating_add(t.amount);
                }
            }
        }
        buckets
    }

    /// The largest expenses of the period.
    #[must_use]
    pub fn top_expenses(in_period: &[&Transaction]) -> Vec<TopExpense> {
        let mut expenses: Vec<&Transaction> =
            in_period.iter().copied().filter(|t| t.is_expense()).collect();
        expenses.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| b.date.cmp(&a.date)));

        expenses
            .into_iter()
            .take(TOP_N)
            .map(|t| TopExpense {
                id: t.id,
                category_name: t.category_name.clone(),
                description: t.description.clone(),
                amount: t.amount,
                date: t.date,
            })
            .collect()
    }

    /// Expense per UTC day, ascending.
    #[must_use]
    pub fn daily_expense(in_period: &[&Transaction]) -> Vec<DailyTotal> {
        let mut days = BTreeMap::new();
        for t in in_period.iter().filter(|t| t.is_expense()) {
            let total: &mut i64 = days.entry(t.date.date_naive()).or_default();
            *total = total.saturating_add(t.amount);
        }

        days.into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect()
    }

    /// Progress of the budgets of `current`, highest percent first.
    #[must_use]
    pub fn budget_progress(budgets: &[Budget], current: MonthKey) -> Vec<BudgetProgress> {
        let mut progress: Vec<BudgetProgress> = budgets
            .iter()
            .filter(|b| b.month == current)
            .map(|b| BudgetProgress {
                budget_id: b.id,
                category_name: b.category_name.clone(),
                used: b.used,
                limit: b.limit,
                percent: BudgetService::percent_used(b.used, b.limit),
            })
            .collect();

        progress.sort_by(|a, b| {
            b.percent
                .cmp(&a.percent)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        progress.truncate(TOP_N);
        progress
    }
}
