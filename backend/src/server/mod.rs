//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::TokenLoginService;
use backend::domain::{CipherTokenIssuer, TalkerService};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::index::index;
use backend::inbound::http::login::login;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::talkers::{create_talker, get_talker, list_talkers, update_talker};
use backend::outbound::persistence::JsonFileTalkerRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the file-backed store and cipher issuer into handler state.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let repository = JsonFileTalkerRepository::open(&config.store_path)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(path = %repository.path().display(), "talker store opened");
    let service = TalkerService::new(Arc::new(repository));
    let issuer = CipherTokenIssuer::new(config.token_secret.as_str());
    Ok(HttpState::new(
        Arc::new(service.clone()),
        Arc::new(service),
        Arc::new(TokenLoginService::new(Arc::new(issuer))),
    ))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(index)
        .service(list_talkers)
        .service(get_talker)
        .service(create_talker)
        .service(update_talker)
        .service(login)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the store directory cannot be opened or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "talker service listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    fn deps_over(dir: &tempfile::TempDir) -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("literal address"),
            dir.path().join("talker.json"),
            "test-secret",
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(build_http_state(&config).expect("state")),
        }
    }

    #[actix_web::test]
    async fn app_serves_talkers_from_the_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = actix_test::init_service(build_app(deps_over(&dir))).await;

        let request = actix_test::TestRequest::post()
            .uri("/talker")
            .insert_header((header::AUTHORIZATION, "abcdefghijklmnop"))
            .set_json(json!({
                "name": "Ana Maria",
                "age": 20,
                "talk": { "watchedAt": "24/05/2021", "rate": 5 }
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(response.headers().contains_key("trace-id"));

        let on_disk: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("talker.json")).expect("document"),
        )
        .expect("JSON document");
        assert_eq!(on_disk[0]["id"], 1);
    }

    #[actix_web::test]
    async fn app_exposes_probes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = actix_test::init_service(build_app(deps_over(&dir))).await;
        let request = actix_test::TestRequest::get().uri("/health/ready").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn missing_store_directory_fails_fast() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("literal address"),
            dir.path().join("missing").join("talker.json"),
            "test-secret",
        );
        assert!(build_http_state(&config).is_err());
    }
}
