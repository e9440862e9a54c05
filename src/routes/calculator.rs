use std::collections::HashMap;

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::calculator;
use crate::models::currency::CURRENCIES;
use crate::state::AppState;

#[derive(Deserialize)]
struct QuoteRequest {
    #[serde(default)]
    amounts: HashMap<String, u64>,
}

#[derive(Deserialize)]
struct AmountRequest {
    amount: String,
}

#[get("/currencies")]
async fn currencies() -> HttpResponse {
    HttpResponse::Ok().json(&CURRENCIES)
}

#[post("/quote")]
async fn quote(body: web::Json<QuoteRequest>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(calculator::quote(&body.amounts)?))
}

#[post("/sessions")]
async fn create_session(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Created().json(calculator::create_session(&state.calculators).await)
}

#[get("/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = calculator::get_session(&state.calculators, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/sessions/{id}/currencies/{currency}")]
async fn set_amount(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    body: web::Json<AmountRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, currency) = path.into_inner();
    let view = calculator::set_amount(&state.calculators, id, &currency, &body.amount).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/sessions/{id}/currencies/{currency}/increment")]
async fn increment(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, currency) = path.into_inner();
    let view = calculator::increment(&state.calculators, id, &currency).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/sessions/{id}/reset")]
async fn reset(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let view = calculator::reset(&state.calculators, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(currencies)
        .service(quote)
        .service(create_session)
        .service(get_session)
        .service(set_amount)
        .service(increment)
        .service(reset);
}
