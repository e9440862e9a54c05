use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::config::EventDetails;
use crate::error::AppError;
use crate::handlers::signup::submit;
use crate::models::signup::{SignupOutcome, SignupRequest};
use crate::state::AppState;

#[derive(Serialize)]
struct EventView<'a> {
    name: &'a str,
    date: &'a str,
    start_time: &'a str,
}

impl<'a> From<&'a EventDetails> for EventView<'a> {
    fn from(event: &'a EventDetails) -> Self {
        Self {
            name: &event.name,
            date: &event.date,
            start_time: &event.start_time,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Created,
    AlreadySignedUp,
    Closed,
    Failed,
}

#[derive(Serialize)]
struct SignupResponse<'a> {
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    event: EventView<'a>,
}

#[get("")]
async fn status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "open": state.config.signups_open,
        "event": EventView::from(&state.config.event),
    }))
}

#[post("")]
async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let event = EventView::from(&state.config.event);

    if !state.config.signups_open {
        return Ok(HttpResponse::Forbidden().json(SignupResponse {
            status: Status::Closed,
            first_name: None,
            message: Some("Sign ups are now closed".to_string()),
            event,
        }));
    }

    body.validate()?;

    let outcome = submit(
        state.signups.as_ref(),
        &body.email,
        &body.first_name,
        &body.whatsapp_phone,
    )
    .await;

    let response = match outcome {
        SignupOutcome::Created { first_name } => HttpResponse::Created().json(SignupResponse {
            status: Status::Created,
            first_name: Some(first_name),
            message: None,
            event,
        }),
        SignupOutcome::AlreadyExists { first_name } => HttpResponse::Ok().json(SignupResponse {
            status: Status::AlreadySignedUp,
            first_name: Some(first_name),
            message: None,
            event,
        }),
        SignupOutcome::Failed { message } => HttpResponse::BadGateway().json(SignupResponse {
            status: Status::Failed,
            first_name: None,
            message: Some(message),
            event,
        }),
    };
    Ok(response)
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(status).service(signup);
}
