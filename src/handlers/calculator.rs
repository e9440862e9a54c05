use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::cache::CalculatorSessions;
use crate::error::AppError;
use crate::models::currency::{CURRENCIES, Tally, format_shekel};

#[derive(Debug, Serialize)]
pub struct CurrencyAmount {
    pub id: &'static str,
    pub name: &'static str,
    pub value: u64,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct CalculatorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub amounts: Vec<CurrencyAmount>,
    pub total: u64,
    pub total_display: String,
}

pub fn view(session_id: Option<Uuid>, tally: &Tally) -> CalculatorView {
    let total = tally.total();
    CalculatorView {
        session_id,
        amounts: CURRENCIES
            .iter()
            .map(|currency| CurrencyAmount {
                id: currency.id,
                name: currency.name,
                value: currency.value,
                amount: tally.amount(currency.id),
            })
            .collect(),
        total,
        total_display: format_shekel(total),
    }
}

pub fn quote(amounts: &HashMap<String, u64>) -> Result<CalculatorView, AppError> {
    let tally = Tally::try_from(amounts)?;
    Ok(view(None, &tally))
}

pub async fn create_session(sessions: &CalculatorSessions) -> CalculatorView {
    let (id, tally) = sessions.create().await;
    tracing::debug!("Created calculator session {id}");
    view(Some(id), &tally)
}

pub async fn get_session(sessions: &CalculatorSessions, id: Uuid) -> Result<CalculatorView, AppError> {
    let tally = sessions.get(id).await?;
    Ok(view(Some(id), &tally))
}

pub async fn set_amount(
    sessions: &CalculatorSessions,
    id: Uuid,
    currency_id: &str,
    raw: &str,
) -> Result<CalculatorView, AppError> {
    let tally = sessions
        .update(id, |tally| tally.set_amount(currency_id, raw).map(|_| ()))
        .await?;
    Ok(view(Some(id), &tally))
}

pub async fn increment(
    sessions: &CalculatorSessions,
    id: Uuid,
    currency_id: &str,
) -> Result<CalculatorView, AppError> {
    let tally = sessions
        .update(id, |tally| tally.increment(currency_id).map(|_| ()))
        .await?;
    Ok(view(Some(id), &tally))
}

pub async fn reset(sessions: &CalculatorSessions, id: Uuid) -> Result<CalculatorView, AppError> {
    let tally = sessions
        .update(id, |tally| {
            tally.reset();
            Ok(())
        })
        .await?;
    Ok(view(Some(id), &tally))
}
