use comfy_table::{Cell, CellAlignment, Table};

use crate::calendar::{next_month, MonthBucket};
use crate::cli::{confirm, open_store};
use crate::error::{ContasError, Result};
use crate::fmt::money;
use crate::models::{Expense, ExpenseCategory};
use crate::reports::{month_expenses, total_expenses};
use crate::store::Record;
use crate::theme::{Palette, ThemeContext};

pub fn add(name: &str, amount: f64, category: ExpenseCategory, month: Option<MonthBucket>) -> Result<()> {
    let mut store = open_store()?;
    let bucket = month.unwrap_or_else(next_month);
    let expense = Expense::new(name, amount, category, bucket)?;
    let label = format!("{} {} ({})", category.icon(), expense.name, money(expense.amount));
    store.expenses().add(expense)?;
    println!("Added expense for {}: {label}", bucket.label());
    Ok(())
}

pub fn list(month: Option<MonthBucket>, all: bool) -> Result<()> {
    let mut store = open_store()?;
    let palette = ThemeContext::load(&store)?.palette();
    let expenses = store.expenses().list()?;

    let (title, rows): (String, Vec<&Expense>) = if all {
        ("All expenses".to_string(), expenses.iter().collect())
    } else {
        let bucket = month.unwrap_or_else(next_month);
        (format!("Expenses \u{2014} {}", bucket.label()), month_expenses(&expenses, bucket))
    };

    if rows.is_empty() {
        println!("{}\nNo expenses.", palette.heading(&title));
        return Ok(());
    }

    println!("{}\n{}", palette.heading(&title), expense_table(&rows, &palette, all));
    println!("Total: {}", money(total_expenses(&rows)));
    Ok(())
}

/// Unpaid rows first, then paid, each keeping stored order.
pub(crate) fn expense_table(rows: &[&Expense], palette: &Palette, with_month: bool) -> Table {
    let mut table = Table::new();
    let mut header = vec!["ID", "Name", "Category", "Amount", "Paid"];
    if with_month {
        header.push("Month");
    }
    table.set_header(header);

    let ordered = rows.iter().filter(|e| !e.paid).chain(rows.iter().filter(|e| e.paid));
    for e in ordered {
        let paid = if e.paid {
            palette.signed(0.0, "\u{2713}").to_string()
        } else {
            palette.dim("\u{2022}").to_string()
        };
        let mut row = vec![
            Cell::new(&e.id),
            Cell::new(&e.name),
            Cell::new(format!("{} {}", e.category.icon(), e.category.label())),
            Cell::new(money(e.amount)).set_alignment(CellAlignment::Right),
            Cell::new(paid).set_alignment(CellAlignment::Center),
        ];
        if with_month {
            row.push(Cell::new(e.bucket()));
        }
        table.add_row(row);
    }
    table
}

pub struct ExpenseEdit {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
}

impl ExpenseEdit {
    /// Month, year and paid state are never touched here.
    fn apply(self, expense: &mut Expense) -> Result<()> {
        if let Some(name) = self.name {
            expense.rename(&name)?;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        Ok(())
    }
}

pub fn edit(id: &str, changes: ExpenseEdit) -> Result<()> {
    let mut store = open_store()?;
    let mut expense = find(&store.expenses().list()?, id)?;
    changes.apply(&mut expense)?;
    let label = format!("{} ({})", expense.name, money(expense.amount));
    store.expenses().update(expense)?;
    println!("Updated expense {id}: {label}");
    Ok(())
}

pub fn pay(id: &str) -> Result<()> {
    let mut store = open_store()?;
    let expense = find(&store.expenses().list()?, id)?;
    let updated = store.expenses().toggle_paid(id)?;
    let now_paid = updated.iter().find(|e| e.id == id).map(|e| e.paid).unwrap_or(false);
    if now_paid {
        println!("Marked paid: {}", expense.name);
    } else {
        println!("Marked unpaid: {}", expense.name);
    }
    Ok(())
}

pub fn remove(id: &str, yes: bool) -> Result<()> {
    let mut store = open_store()?;
    let expense = find(&store.expenses().list()?, id)?;
    if !yes && !confirm(&format!("Remove expense '{}'?", expense.name)) {
        println!("Cancelled.");
        return Ok(());
    }
    store.expenses().remove(id)?;
    println!("Removed expense: {}", expense.name);
    Ok(())
}

fn find(expenses: &[Expense], id: &str) -> Result<Expense> {
    expenses
        .iter()
        .find(|e| e.id() == id)
        .cloned()
        .ok_or_else(|| ContasError::NotFound {
            kind: Expense::KIND,
            id: id.to_string(),
        })
}
