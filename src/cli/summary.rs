use comfy_table::{Cell, CellAlignment, Table};

use crate::calendar::{next_month, MonthBucket};
use crate::cli::expenses::expense_table;
use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::models::Expense;
use crate::reports::get_monthly_summary;
use crate::theme::ThemeContext;

const BAR_WIDTH: usize = 30;

pub fn run(month: Option<MonthBucket>) -> Result<()> {
    let mut store = open_store()?;
    let palette = ThemeContext::load(&store)?.palette();
    let companies = store.companies().list()?;
    let expenses = store.expenses().list()?;
    let bucket = month.unwrap_or_else(next_month);
    let s = get_monthly_summary(&companies, &expenses, bucket);

    println!("{}", palette.heading(&format!("Expenses for {}", bucket.label())));
    println!();

    let mut totals = Table::new();
    totals.add_row(vec![
        Cell::new("Income"),
        Cell::new(palette.signed(s.income, &money(s.income))).set_alignment(CellAlignment::Right),
    ]);
    totals.add_row(vec![
        Cell::new("Expenses"),
        Cell::new(palette.signed(-s.expenses, &money(s.expenses)))
            .set_alignment(CellAlignment::Right),
    ]);
    totals.add_row(vec![
        Cell::new("Left over"),
        Cell::new(palette.signed(s.leftover, &money(s.leftover)))
            .set_alignment(CellAlignment::Right),
    ]);
    println!("{totals}");

    if s.total_count == 0 {
        println!();
        println!("{}", palette.dim("No expenses for this month."));
        return Ok(());
    }

    println!();
    println!("{}", palette.heading("By category"));
    for item in &s.by_category {
        println!(
            "  {} {} \u{00B7} {}",
            item.category.icon(),
            item.category.label(),
            money(item.total)
        );
    }

    println!();
    println!(
        "Paid {}/{}  {} {}",
        s.paid_count,
        s.total_count,
        palette.progress_bar(s.progress, BAR_WIDTH),
        percent(s.progress)
    );

    let rows: Vec<&Expense> = s.unpaid.iter().chain(s.paid.iter()).collect();
    println!();
    println!("{}", expense_table(&rows, &palette, false));
    Ok(())
}
