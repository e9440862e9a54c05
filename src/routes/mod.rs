pub mod calculator;
pub mod health;
pub mod lockbox;
pub mod signup;

use actix_web::{HttpResponse, Responder, get, http::header, web};

use crate::error::AppError;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, "/signup"))
        .finish()
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::MalformedPayload(err.to_string()).into()
    }))
    .service(index)
    .service(web::scope("/health").configure(health::init))
    .service(web::scope("/signup").configure(signup::init))
    .service(web::scope("/calculator").configure(calculator::init))
    .service(web::scope("/lockbox").configure(lockbox::init));
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::web;

    use crate::config::Config;
    use crate::state::AppState;
    use crate::store::SignupStore;
    use crate::store::memory::MemoryStore;

    pub fn config() -> Config {
        let mut config = Config::from_lookup(|_| None).expect("default config");
        config.lockbox_unlock_delay = Duration::ZERO;
        config
    }

    pub fn state_with(config: Config, store: Arc<dyn SignupStore>) -> web::Data<AppState> {
        web::Data::new(AppState::with_store(config, store))
    }

    pub fn state() -> web::Data<AppState> {
        state_with(config(), Arc::new(MemoryStore::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn root_redirects_to_signup() {
        let app = test::init_service(
            App::new()
                .app_data(testing::state())
                .configure(init),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/signup");
    }

    #[actix_web::test]
    async fn ping_pongs() {
        let app = test::init_service(App::new().app_data(testing::state()).configure(init)).await;

        let req = test::TestRequest::get().uri("/health/ping").to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "pong");
    }

    #[actix_web::test]
    async fn info_reports_store_kind() {
        let app = test::init_service(App::new().app_data(testing::state()).configure(init)).await;

        let req = test::TestRequest::get().uri("/health/info").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["store"], "memory");
        assert_eq!(body["signups_open"], true);
    }
}
