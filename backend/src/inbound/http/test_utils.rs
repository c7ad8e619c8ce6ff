//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::state::HttpState;
use super::{index, login, talkers};
use crate::domain::ports::{InMemoryTalkerRepository, TalkerRepository, TokenLoginService};
use crate::domain::{CipherTokenIssuer, Talk, Talker, TalkerDraft, TalkerId, TalkerService};

/// Token accepted by the authorization check.
pub const VALID_TOKEN: &str = "abcdefghijklmnop";

/// Two-record collection mirroring the seed document.
pub fn seed_talkers() -> Vec<Talker> {
    vec![
        talker(1, "Henrique Albuquerque", 62, "23/10/2020", 5),
        talker(2, "Heloísa Albuquerque", 67, "23/10/2020", 5),
    ]
}

pub fn talker(id: u64, name: &str, age: u64, watched_at: &str, rate: u8) -> Talker {
    let id = TalkerId::new(id).expect("positive id");
    Talker::from_draft(id, TalkerDraft::new(name, age, Talk::new(watched_at, rate)))
}

/// In-memory repository plus the state wired over it.
pub struct TestHarness {
    pub repository: Arc<InMemoryTalkerRepository>,
}

impl TestHarness {
    pub fn with_talkers(talkers: Vec<Talker>) -> Self {
        Self {
            repository: Arc::new(InMemoryTalkerRepository::with_talkers(talkers)),
        }
    }

    pub fn empty() -> Self {
        Self::with_talkers(Vec::new())
    }

    pub fn state(&self) -> HttpState {
        let repository: Arc<dyn TalkerRepository> = self.repository.clone();
        state_over(repository)
    }
}

/// State backed by an arbitrary repository.
pub fn state_over(repository: Arc<dyn TalkerRepository>) -> HttpState {
    let service = TalkerService::new(repository);
    let login = TokenLoginService::new(Arc::new(CipherTokenIssuer::default()));
    HttpState::new(
        Arc::new(service.clone()),
        Arc::new(service),
        Arc::new(login),
    )
}

/// App exposing every talker route over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(index::index)
        .service(talkers::list_talkers)
        .service(talkers::get_talker)
        .service(talkers::create_talker)
        .service(talkers::update_talker)
        .service(login::login)
}
