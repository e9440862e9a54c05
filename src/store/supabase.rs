use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;

use super::{SIGNUPS_COLLECTION, SignupStore, StoreError};
use crate::models::signup::SignupRecord;

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Signups table exposed through the hosted PostgREST API.
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize, Default)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

impl SupabaseStore {
    pub fn new(url: &str, anon_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(anon_key).context("Invalid SUPABASE_ANON_KEY")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {anon_key}"))
                .context("Invalid SUPABASE_ANON_KEY")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{SIGNUPS_COLLECTION}",
                url.trim_end_matches('/')
            ),
        })
    }
}

fn classify(status: StatusCode, body: &str) -> StoreError {
    let error: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = error
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("store responded with {status}"));

    match error.code.as_deref() {
        Some(UNIQUE_VIOLATION) => StoreError::DuplicateKey(message),
        None if status == StatusCode::CONFLICT => StoreError::DuplicateKey(message),
        _ => StoreError::Backend(message),
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify(status, &body))
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl SignupStore for SupabaseStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError> {
        let filter = format!("eq.{email}");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("select", "email,first_name,whatsapp_phone"),
                ("email", filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(transport)?;

        let rows: Vec<SignupRecord> = check(response).await?.json().await.map_err(transport)?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(transport)?;

        check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Rows = web::Data<Mutex<Vec<SignupRecord>>>;

    fn authorized(req: &HttpRequest) -> bool {
        req.headers().get("apikey").and_then(|v| v.to_str().ok()) == Some("anon-key")
            && req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                == Some("Bearer anon-key")
    }

    async fn select(
        req: HttpRequest,
        rows: Rows,
        query: web::Query<HashMap<String, String>>,
    ) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" }));
        }
        let wanted = query
            .get("email")
            .and_then(|filter| filter.strip_prefix("eq."))
            .unwrap_or_default()
            .to_string();
        let found: Vec<SignupRecord> = rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.email == wanted)
            .cloned()
            .collect();
        HttpResponse::Ok().json(found)
    }

    async fn insert(req: HttpRequest, rows: Rows, body: web::Json<Vec<SignupRecord>>) -> HttpResponse {
        if !authorized(&req) {
            return HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" }));
        }
        let mut rows = rows.lock().unwrap();
        for record in body.into_inner() {
            if record.first_name == "explode" {
                return HttpResponse::InternalServerError()
                    .json(json!({ "code": "XX000", "message": "internal error" }));
            }
            if rows.iter().any(|row| row.email == record.email) {
                return HttpResponse::Conflict().json(json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"signups_email_key\"",
                }));
            }
            rows.push(record);
        }
        HttpResponse::Created().finish()
    }

    fn record(email: &str, first_name: &str) -> SignupRecord {
        SignupRecord {
            email: email.to_string(),
            first_name: first_name.to_string(),
            whatsapp_phone: "+1 555 0100".to_string(),
        }
    }

    #[actix_web::test]
    async fn talks_postgrest_against_local_server() {
        let rows: Rows = web::Data::new(Mutex::new(Vec::new()));
        let app_rows = rows.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(app_rows.clone()).service(
                web::resource("/rest/v1/signups")
                    .route(web::get().to(select))
                    .route(web::post().to(insert)),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock store");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let store = SupabaseStore::new(&format!("http://{addr}/"), "anon-key").unwrap();

        assert_eq!(store.find_by_email("ada+rsvp@example.com").await, Ok(None));
        store
            .insert(&record("ada+rsvp@example.com", "Ada"))
            .await
            .unwrap();
        let found = store.find_by_email("ada+rsvp@example.com").await.unwrap();
        assert_eq!(found, Some(record("ada+rsvp@example.com", "Ada")));

        let duplicate = store
            .insert(&record("ada+rsvp@example.com", "Eve"))
            .await
            .unwrap_err();
        assert!(matches!(duplicate, StoreError::DuplicateKey(_)));

        let failure = store
            .insert(&record("bob@example.com", "explode"))
            .await
            .unwrap_err();
        assert_eq!(failure, StoreError::Backend("internal error".to_string()));
        assert_eq!(rows.lock().unwrap().len(), 1);

        let unauthorized = SupabaseStore::new(&format!("http://{addr}"), "wrong").unwrap();
        assert!(matches!(
            unauthorized.find_by_email("ada+rsvp@example.com").await,
            Err(StoreError::Backend(_))
        ));

        handle.stop(false).await;
    }

    #[test]
    fn unique_violation_is_a_duplicate_key() {
        let err = classify(
            StatusCode::CONFLICT,
            r#"{"code":"23505","message":"duplicate key value"}"#,
        );
        assert_eq!(err, StoreError::DuplicateKey("duplicate key value".to_string()));
    }

    #[test]
    fn other_conflicts_are_backend_errors() {
        let err = classify(
            StatusCode::CONFLICT,
            r#"{"code":"23503","message":"foreign key violation"}"#,
        );
        assert_eq!(err, StoreError::Backend("foreign key violation".to_string()));
    }

    #[test]
    fn unparseable_bodies_fall_back_to_status() {
        let err = classify(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert_eq!(
            err,
            StoreError::Backend("store responded with 502 Bad Gateway".to_string())
        );
    }
}
