//! Shared helpers for talker HTTP integration tests.
//!
//! Each test gets its own temporary directory holding the talker document,
//! so tests can seed it, drive the HTTP surface and inspect the file.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::path::PathBuf;
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use backend::Trace;
use backend::domain::ports::TokenLoginService;
use backend::domain::{CipherTokenIssuer, TalkerService};
use backend::inbound::http::index::index;
use backend::inbound::http::login::login;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::talkers::{create_talker, get_talker, list_talkers, update_talker};
use backend::outbound::persistence::JsonFileTalkerRepository;
use serde_json::{Value, json};

/// Temporary talker document plus the state wired over it.
pub struct StoreFixture {
    dir: tempfile::TempDir,
}

impl StoreFixture {
    /// Empty directory; the document does not exist yet.
    pub fn absent() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    /// Directory seeded with `document`.
    pub fn seeded(document: &Value) -> Self {
        let fixture = Self::absent();
        std::fs::write(fixture.path(), document.to_string()).expect("seed document");
        fixture
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("talker.json")
    }

    /// Current document contents parsed as JSON.
    pub fn document(&self) -> Value {
        let text = std::fs::read_to_string(self.path()).expect("read document");
        serde_json::from_str(&text).expect("document is JSON")
    }

    pub fn state(&self) -> HttpState {
        let repository = JsonFileTalkerRepository::open(self.path()).expect("open store");
        let service = TalkerService::new(Arc::new(repository));
        HttpState::new(
            Arc::new(service.clone()),
            Arc::new(service),
            Arc::new(TokenLoginService::new(Arc::new(
                CipherTokenIssuer::default(),
            ))),
        )
    }
}

/// Initialise the full talker app over `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(index)
            .service(list_talkers)
            .service(get_talker)
            .service(create_talker)
            .service(update_talker)
            .service(login),
    )
    .await
}

/// Status and JSON body (`Value::Null` when empty).
pub async fn call_json<S>(app: &S, request: Request) -> (actix_web::http::StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Two-record document used across the suites.
pub fn seed_document() -> Value {
    json!([
        {
            "name": "Henrique Albuquerque",
            "age": 62,
            "id": 1,
            "talk": { "watchedAt": "23/10/2020", "rate": 5 }
        },
        {
            "name": "Heloísa Albuquerque",
            "age": 67,
            "id": 2,
            "talk": { "watchedAt": "23/10/2020", "rate": 5 }
        }
    ])
}

pub fn ana_maria() -> Value {
    json!({
        "name": "Ana Maria",
        "age": 20,
        "talk": { "watchedAt": "24/05/2021", "rate": 5 }
    })
}
