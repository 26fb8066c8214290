use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{confirm, open_store};
use crate::error::{ContasError, Result};
use crate::fmt::money;
use crate::models::Company;
use crate::reports::total_income;
use crate::store::Record;
use crate::theme::ThemeContext;

pub fn add(name: &str, salary: f64, vr: Option<f64>, transport: Option<f64>) -> Result<()> {
    let mut store = open_store()?;
    let company = Company::new(name, salary, vr, transport)?;
    let label = format!("{} ({})", company.name, money(company.monthly_income()));
    store.companies().add(company)?;
    println!("Added company: {label}");
    Ok(())
}

pub fn list() -> Result<()> {
    let mut store = open_store()?;
    let palette = ThemeContext::load(&store)?.palette();
    let companies = store.companies().list()?;

    if companies.is_empty() {
        println!("No companies yet. Add one with `contas companies add`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Salary", "VR", "Transport", "Monthly"]);
    for c in &companies {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(money(c.salary)).set_alignment(CellAlignment::Right),
            Cell::new(benefit(c.has_vr, c.vr_amount)).set_alignment(CellAlignment::Right),
            Cell::new(benefit(c.has_transport, c.transport_amount))
                .set_alignment(CellAlignment::Right),
            Cell::new(money(c.monthly_income())).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n{table}", palette.heading("Companies"));

    let income = total_income(&companies);
    println!("Total income: {}", palette.signed(income, &money(income)));
    Ok(())
}

fn benefit(enabled: bool, amount: f64) -> String {
    if enabled {
        money(amount)
    } else {
        "\u{2014}".to_string()
    }
}

pub struct CompanyEdit {
    pub name: Option<String>,
    pub salary: Option<f64>,
    pub vr: Option<f64>,
    pub no_vr: bool,
    pub transport: Option<f64>,
    pub no_transport: bool,
}

impl CompanyEdit {
    fn apply(self, company: &mut Company) -> Result<()> {
        if let Some(name) = self.name {
            company.rename(&name)?;
        }
        if let Some(salary) = self.salary {
            company.salary = salary;
        }
        if self.no_vr {
            company.set_vr(None);
        } else if self.vr.is_some() {
            company.set_vr(self.vr);
        }
        if self.no_transport {
            company.set_transport(None);
        } else if self.transport.is_some() {
            company.set_transport(self.transport);
        }
        Ok(())
    }
}

pub fn edit(id: &str, changes: CompanyEdit) -> Result<()> {
    let mut store = open_store()?;
    let mut company = find(&store.companies().list()?, id)?;
    changes.apply(&mut company)?;
    let label = format!("{} ({})", company.name, money(company.monthly_income()));
    store.companies().update(company)?;
    println!("Updated company {id}: {label}");
    Ok(())
}

pub fn remove(id: &str, yes: bool) -> Result<()> {
    let mut store = open_store()?;
    let company = find(&store.companies().list()?, id)?;
    if !yes && !confirm(&format!("Remove company '{}'?", company.name)) {
        println!("Cancelled.");
        return Ok(());
    }
    let remaining = store.companies().remove(id)?;
    println!("Removed company: {} ({} left)", company.name, remaining.len());
    Ok(())
}

fn find(companies: &[Company], id: &str) -> Result<Company> {
    companies
        .iter()
        .find(|c| c.id() == id)
        .cloned()
        .ok_or_else(|| ContasError::NotFound {
            kind: Company::KIND,
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_changes() -> CompanyEdit {
        CompanyEdit {
            name: None,
            salary: None,
            vr: None,
            no_vr: false,
            transport: None,
            no_transport: false,
        }
    }

    #[test]
    fn test_edit_keeps_untouched_fields() {
        let mut c = Company::new("Acme", 3000.0, Some(500.0), Some(200.0)).unwrap();
        CompanyEdit { salary: Some(3200.0), ..no_changes() }.apply(&mut c).unwrap();
        assert_eq!(c.salary, 3200.0);
        assert!(c.has_vr);
        assert_eq!(c.vr_amount, 500.0);
        assert_eq!(c.transport_amount, 200.0);
    }

    #[test]
    fn test_edit_switches_benefits() {
        let mut c = Company::new("Acme", 3000.0, Some(500.0), None).unwrap();
        CompanyEdit { no_vr: true, transport: Some(150.0), ..no_changes() }
            .apply(&mut c)
            .unwrap();
        assert!(!c.has_vr);
        assert_eq!(c.vr_amount, 0.0);
        assert!(c.has_transport);
        assert_eq!(c.monthly_income(), 3150.0);
    }

    #[test]
    fn test_edit_rejects_blank_name() {
        let mut c = Company::new("Acme", 3000.0, None, None).unwrap();
        let result = CompanyEdit { name: Some(" ".into()), ..no_changes() }.apply(&mut c);
        assert!(matches!(result, Err(ContasError::EmptyName)));
        assert_eq!(c.name, "Acme");
    }

    #[test]
    fn test_find_reports_missing_id() {
        let c = Company::new("Acme", 3000.0, None, None).unwrap();
        assert_eq!(find(&[c.clone()], &c.id).unwrap(), c);
        assert!(matches!(find(&[c], "nope"), Err(ContasError::NotFound { .. })));
    }
}
