use crate::calendar::next_month;
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::reports::{month_expenses, total_income};
use crate::settings::{get_db_path, load_settings};
use crate::storage::SqliteStorage;
use crate::store::RecordStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = get_db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `contas init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("DB size:    {}", format_bytes(size));

    let mut store = RecordStore::new(SqliteStorage::open(&db_path)?);
    let companies = store.companies().list()?;
    let expenses = store.expenses().list()?;
    let bucket = next_month();
    let upcoming = month_expenses(&expenses, bucket).len();

    println!("Theme:      {}", store.get_theme()?);
    println!();
    println!("Companies:     {}", companies.len());
    println!("Income:        {}", money(total_income(&companies)));
    println!("Expenses:      {}", expenses.len());
    println!("Next month:    {} ({upcoming} expenses)", bucket.label());
    Ok(())
}
