use crate::cli::{confirm, open_store};
use crate::error::Result;

pub fn run(yes: bool) -> Result<()> {
    let mut store = open_store()?;
    // Counts are informational only; unreadable data must still be clearable.
    let companies = store.companies().list().map(|l| l.len()).ok();
    let expenses = store.expenses().list().map(|l| l.len()).ok();
    let summary = describe(companies, expenses);

    if !yes && !confirm(&format!("Delete {summary}? This cannot be undone.")) {
        println!("Cancelled.");
        return Ok(());
    }

    store.clear_all()?;
    println!("All data removed ({summary}).");
    Ok(())
}

fn describe(companies: Option<usize>, expenses: Option<usize>) -> String {
    let count = |n: Option<usize>| n.map_or_else(|| "unreadable".to_string(), |n| n.to_string());
    format!("{} companies, {} expenses", count(companies), count(expenses))
}
