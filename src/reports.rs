use crate::calendar::MonthBucket;
use crate::models::{Company, Expense, ExpenseCategory};

// ---------------------------------------------------------------------------
// Income
// ---------------------------------------------------------------------------

pub fn total_income(companies: &[Company]) -> f64 {
    companies.iter().map(Company::monthly_income).sum()
}

// ---------------------------------------------------------------------------
// Month bucket
// ---------------------------------------------------------------------------

/// Expenses filed under `bucket`, in persisted order.
pub fn month_expenses(expenses: &[Expense], bucket: MonthBucket) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.month == bucket.month && e.year == bucket.year)
        .collect()
}

pub fn total_expenses(expenses: &[&Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// May be negative.
pub fn leftover(income: f64, expenses: f64) -> f64 {
    income - expenses
}

/// Share of expenses already paid; 0 for an empty month.
pub fn payment_progress(expenses: &[&Expense]) -> f64 {
    if expenses.is_empty() {
        return 0.0;
    }
    let paid = expenses.iter().filter(|e| e.paid).count();
    paid as f64 / expenses.len() as f64
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

/// Totals per category in the fixed category order. Categories summing to
/// zero are left out.
pub fn category_breakdown(expenses: &[&Expense]) -> Vec<CategoryTotal> {
    ExpenseCategory::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            total: expenses
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum(),
        })
        .filter(|c| c.total > 0.0)
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

pub struct MonthlySummary {
    pub bucket: MonthBucket,
    pub income: f64,
    pub expenses: f64,
    pub leftover: f64,
    pub paid_count: usize,
    pub total_count: usize,
    pub progress: f64,
    pub by_category: Vec<CategoryTotal>,
    pub unpaid: Vec<Expense>,
    pub paid: Vec<Expense>,
}

pub fn get_monthly_summary(
    companies: &[Company],
    expenses: &[Expense],
    bucket: MonthBucket,
) -> MonthlySummary {
    let month = month_expenses(expenses, bucket);
    let income = total_income(companies);
    let spent = total_expenses(&month);
    let (paid, unpaid): (Vec<Expense>, Vec<Expense>) =
        month.iter().map(|e| (*e).clone()).partition(|e| e.paid);

    MonthlySummary {
        bucket,
        income,
        expenses: spent,
        leftover: leftover(income, spent),
        paid_count: paid.len(),
        total_count: month.len(),
        progress: payment_progress(&month),
        by_category: category_breakdown(&month),
        unpaid,
        paid,
    }
}
