use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::handlers::lockbox;
use crate::state::AppState;

#[derive(Deserialize)]
struct UnlockRequest {
    words: Vec<String>,
}

#[get("/{id}")]
async fn describe(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(lockbox::describe(&path)?))
}

#[post("/{id}/unlock")]
async fn unlock(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UnlockRequest>,
) -> Result<HttpResponse, AppError> {
    let result = lockbox::unlock(&path, &body.words, state.config.lockbox_unlock_delay).await?;
    Ok(HttpResponse::Ok().json(json!({ "id": path.as_str(), "result": result })))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(describe).service(unlock);
}
