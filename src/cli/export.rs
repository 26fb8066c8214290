use std::io::Write;
use std::path::PathBuf;

use crate::calendar::MonthBucket;
use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::decimal;
use crate::models::{Company, Expense};
use crate::reports::month_expenses;
use crate::settings::get_data_dir;

fn default_path(name: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("{name}-{date}.csv"))
}

fn resolve(output: Option<String>, name: &str) -> Result<PathBuf> {
    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path(name));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

pub fn companies(output: Option<String>) -> Result<()> {
    let mut store = open_store()?;
    let rows = store.companies().list()?;
    let path = resolve(output, "companies")?;
    let file = std::fs::File::create(&path)?;
    write_companies(&rows, file)?;
    println!("Wrote {} companies to {}", rows.len(), path.display());
    Ok(())
}

pub fn expenses(month: Option<MonthBucket>, output: Option<String>) -> Result<()> {
    let mut store = open_store()?;
    let all = store.expenses().list()?;
    let rows: Vec<&Expense> = match month {
        Some(bucket) => month_expenses(&all, bucket),
        None => all.iter().collect(),
    };
    let name = match month {
        Some(bucket) => format!("expenses-{bucket}"),
        None => "expenses".to_string(),
    };
    let path = resolve(output, &name)?;
    let file = std::fs::File::create(&path)?;
    write_expenses(&rows, file)?;
    println!("Wrote {} expenses to {}", rows.len(), path.display());
    Ok(())
}

fn write_companies<W: Write>(rows: &[Company], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["id", "name", "salary", "vr", "transport", "monthly_income"])?;
    for c in rows {
        wtr.write_record([
            c.id.clone(),
            c.name.clone(),
            decimal(c.salary),
            if c.has_vr { decimal(c.vr_amount) } else { String::new() },
            if c.has_transport { decimal(c.transport_amount) } else { String::new() },
            decimal(c.monthly_income()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_expenses<W: Write>(rows: &[&Expense], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["id", "month", "name", "category", "amount", "paid"])?;
    for e in rows {
        wtr.write_record([
            e.id.clone(),
            e.bucket().to_string(),
            e.name.clone(),
            e.category.as_str().to_string(),
            decimal(e.amount),
            String::from(if e.paid { "yes" } else { "no" }),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
