use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthBucket;
use crate::error::{ContasError, Result};

/// An income source: an employer with a salary and optional meal (VR) and
/// transport benefits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub salary: f64,
    #[serde(rename = "hasVR")]
    pub has_vr: bool,
    pub vr_amount: f64,
    pub has_transport: bool,
    pub transport_amount: f64,
}

impl Company {
    /// Build a company with a fresh id. A benefit passed as `None` is stored
    /// with its flag off and a zero amount.
    pub fn new(
        name: &str,
        salary: f64,
        vr: Option<f64>,
        transport: Option<f64>,
    ) -> Result<Self> {
        let mut company = Self {
            id: generate_id(),
            name: clean_name(name)?,
            salary,
            has_vr: false,
            vr_amount: 0.0,
            has_transport: false,
            transport_amount: 0.0,
        };
        company.set_vr(vr);
        company.set_transport(transport);
        Ok(company)
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        self.name = clean_name(name)?;
        Ok(())
    }

    pub fn set_vr(&mut self, vr: Option<f64>) {
        self.has_vr = vr.is_some();
        self.vr_amount = vr.unwrap_or(0.0);
    }

    pub fn set_transport(&mut self, transport: Option<f64>) {
        self.has_transport = transport.is_some();
        self.transport_amount = transport.unwrap_or(0.0);
    }

    /// Salary plus whichever benefits are switched on.
    pub fn monthly_income(&self) -> f64 {
        let vr = if self.has_vr { self.vr_amount } else { 0.0 };
        let transport = if self.has_transport {
            self.transport_amount
        } else {
            0.0
        };
        self.salary + vr + transport
    }
}

/// A bill filed under one (month, year) bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// 0 = January.
    pub month: u32,
    pub year: i32,
    pub paid: bool,
}

impl Expense {
    pub fn new(
        name: &str,
        amount: f64,
        category: ExpenseCategory,
        bucket: MonthBucket,
    ) -> Result<Self> {
        Ok(Self {
            id: generate_id(),
            name: clean_name(name)?,
            amount,
            category,
            month: bucket.month,
            year: bucket.year,
            paid: false,
        })
    }

    pub fn rename(&mut self, name: &str) -> Result<()> {
        self.name = clean_name(name)?;
        Ok(())
    }

    pub fn bucket(&self) -> MonthBucket {
        MonthBucket {
            month: self.month,
            year: self.year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Moradia,
    Alimentacao,
    Transporte,
    Saude,
    Educacao,
    Lazer,
    Servicos,
    Outros,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Moradia,
        ExpenseCategory::Alimentacao,
        ExpenseCategory::Transporte,
        ExpenseCategory::Saude,
        ExpenseCategory::Educacao,
        ExpenseCategory::Lazer,
        ExpenseCategory::Servicos,
        ExpenseCategory::Outros,
    ];

    /// The tag as it is persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Moradia => "moradia",
            ExpenseCategory::Alimentacao => "alimentacao",
            ExpenseCategory::Transporte => "transporte",
            ExpenseCategory::Saude => "saude",
            ExpenseCategory::Educacao => "educacao",
            ExpenseCategory::Lazer => "lazer",
            ExpenseCategory::Servicos => "servicos",
            ExpenseCategory::Outros => "outros",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Moradia => "Moradia",
            ExpenseCategory::Alimentacao => "Alimentação",
            ExpenseCategory::Transporte => "Transporte",
            ExpenseCategory::Saude => "Saúde",
            ExpenseCategory::Educacao => "Educação",
            ExpenseCategory::Lazer => "Lazer",
            ExpenseCategory::Servicos => "Serviços",
            ExpenseCategory::Outros => "Outros",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseCategory::Moradia => "\u{1F3E0}",
            ExpenseCategory::Alimentacao => "\u{1F37D}\u{FE0F}",
            ExpenseCategory::Transporte => "\u{1F697}",
            ExpenseCategory::Saude => "\u{1F48A}",
            ExpenseCategory::Educacao => "\u{1F4DA}",
            ExpenseCategory::Lazer => "\u{1F3AE}",
            ExpenseCategory::Servicos => "\u{1F4F1}",
            ExpenseCategory::Outros => "\u{1F4E6}",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ContasError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| {
                let tags: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect();
                ContasError::Other(format!(
                    "Unknown category '{s}' (expected one of: {})",
                    tags.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ContasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ContasError::Other(format!(
                "Unknown theme '{other}' (expected dark or light)"
            ))),
        }
    }
}

/// Client-side record id: epoch milliseconds in base 36 followed by six
/// random base-36 characters. Only meant to avoid collisions on one device.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut id = to_base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..6 {
        let digit = rng.gen_range(0..36u32);
        id.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let d = (n % 36) as u32;
        digits.push(char::from_digit(d, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}

fn clean_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ContasError::EmptyName);
    }
    Ok(trimmed.to_string())
}
