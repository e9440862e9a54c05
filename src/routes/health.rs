use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::state::AppState;

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

#[get("/info")]
async fn info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "store": state.config.store.kind(),
        "signups_open": state.config.signups_open,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(info);
}
