use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Currency {
    pub id: &'static str,
    pub name: &'static str,
    /// Worth of one unit, in shekel.
    pub value: u64,
}

pub static CURRENCIES: [Currency; 10] = [
    Currency { id: "widows-mites", name: "Widow's Mites", value: 1 },
    Currency { id: "mustard-seeds", name: "Mustard Seeds", value: 3 },
    Currency { id: "copper-coin", name: "Copper Coin", value: 5 },
    Currency { id: "silver-coin", name: "Silver Coin", value: 11 },
    Currency { id: "denarius", name: "Denarius", value: 17 },
    Currency { id: "loaf-and-fish", name: "Loaf & Fish", value: 23 },
    Currency { id: "trade-seal", name: "Trade Seal", value: 37 },
    Currency { id: "gold-coin", name: "Gold Coin", value: 53 },
    Currency { id: "talent", name: "Talent", value: 101 },
    Currency { id: "kings-tax", name: "King's Tax", value: 131 },
];

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("static regex"));

pub fn find_currency(id: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.id == id)
}

/// Parses what a visitor typed into a quantity box: empty means zero,
/// otherwise only ASCII digits are accepted.
pub fn parse_amount(raw: &str) -> Result<u64, AppError> {
    if raw.is_empty() {
        return Ok(0);
    }
    if !DIGITS.is_match(raw) {
        return Err(AppError::InvalidAmount(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| AppError::InvalidAmount(raw.to_string()))
}

/// Quantities entered per currency. Currencies never touched count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    amounts: HashMap<&'static str, u64>,
}

impl Tally {
    pub fn amount(&self, currency_id: &str) -> u64 {
        self.amounts.get(currency_id).copied().unwrap_or(0)
    }

    pub fn set_amount(&mut self, currency_id: &str, raw: &str) -> Result<u64, AppError> {
        let currency = lookup(currency_id)?;
        let amount = parse_amount(raw)?;
        self.amounts.insert(currency.id, amount);
        Ok(amount)
    }

    pub fn increment(&mut self, currency_id: &str) -> Result<u64, AppError> {
        let currency = lookup(currency_id)?;
        let amount = self.amounts.entry(currency.id).or_insert(0);
        *amount = amount.saturating_add(1);
        Ok(*amount)
    }

    pub fn reset(&mut self) {
        self.amounts.clear();
    }

    pub fn total(&self) -> u64 {
        CURRENCIES.iter().fold(0u64, |total, currency| {
            total.saturating_add(self.amount(currency.id).saturating_mul(currency.value))
        })
    }
}

impl TryFrom<&HashMap<String, u64>> for Tally {
    type Error = AppError;

    fn try_from(amounts: &HashMap<String, u64>) -> Result<Self, Self::Error> {
        let mut tally = Tally::default();
        for (id, amount) in amounts {
            let currency = lookup(id)?;
            tally.amounts.insert(currency.id, *amount);
        }
        Ok(tally)
    }
}

fn lookup(currency_id: &str) -> Result<&'static Currency, AppError> {
    find_currency(currency_id).ok_or_else(|| AppError::CurrencyNotFound(currency_id.to_string()))
}

/// `1234567` -> `"1,234,567"`
pub fn format_shekel(total: u64) -> String {
    let digits = total.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
