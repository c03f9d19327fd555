use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use contact_backend::{
    entities::contact::{NewContactSubmission, StoredSubmission},
    errors::{AppError, NotifyError},
    limiter::rate_limiter::{FixedWindowRateLimiter, RateLimiter},
    repositories::{contact::ContactSubmissionRepository, notifier::ContactNotifier},
    use_cases::contact::ContactHandler,
    AppState,
};
use mockall::mock;
use serde_json::{json, Value};
use uuid::Uuid;

mock! {
    pub ContactRepo {}

    #[async_trait]
    impl ContactSubmissionRepository for ContactRepo {
        async fn create_submission(&self, submission: &NewContactSubmission) -> Result<StoredSubmission, AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

mock! {
    pub Notifier {}

    #[async_trait]
    impl ContactNotifier for Notifier {
        async fn notify(&self, submission: &NewContactSubmission) -> Result<(), NotifyError>;
    }
}

/// Rejects everyone, to observe what happens before parsing.
#[allow(dead_code)]
pub struct DenyAll;

impl RateLimiter for DenyAll {
    fn check(&self, _identity: &str) -> bool {
        false
    }
}

#[allow(dead_code)]
pub fn valid_form() -> Value {
    json!({
        "name": "Jeanne Martin",
        "company": "Atelier Martin",
        "email": "jeanne@example.com",
        "service": "Vidéo",
        "budget": "2000-5000€",
        "message": "Bonjour, je souhaite un devis pour une vidéo promotionnelle."
    })
}

#[allow(dead_code)]
pub fn valid_submission() -> NewContactSubmission {
    NewContactSubmission {
        name: "Jeanne Martin".into(),
        company: Some("Atelier Martin".into()),
        email: "jeanne@example.com".into(),
        service: Some("Vidéo".into()),
        budget: Some("2000-5000€".into()),
        message: "Bonjour, je souhaite un devis pour une vidéo promotionnelle.".into(),
    }
}

#[allow(dead_code)]
pub fn stored() -> Result<StoredSubmission, AppError> {
    Ok(StoredSubmission { id: Uuid::new_v4() })
}

/// Repository expecting exactly `times` inserts, all succeeding.
#[allow(dead_code)]
pub fn repo_storing(times: usize) -> MockContactRepo {
    let mut repo = MockContactRepo::new();
    repo.expect_create_submission()
        .times(times)
        .returning(|_| stored());
    repo
}

#[allow(dead_code)]
pub fn repo_untouched() -> MockContactRepo {
    let mut repo = MockContactRepo::new();
    repo.expect_create_submission().never();
    repo
}

#[allow(dead_code)]
pub fn notifier_untouched() -> MockNotifier {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();
    notifier
}

pub fn handler(repo: MockContactRepo, notifier: Option<MockNotifier>) -> ContactHandler {
    ContactHandler::new(
        Arc::new(repo),
        notifier.map(|n| Arc::new(n) as Arc<dyn ContactNotifier>),
    )
}

#[allow(dead_code)]
pub fn app_state(repo: MockContactRepo, notifier: Option<MockNotifier>) -> web::Data<AppState> {
    web::Data::new(AppState::with_services(
        handler(repo, notifier),
        Arc::new(FixedWindowRateLimiter::default()),
    ))
}

#[allow(dead_code)]
pub fn app_state_with_limiter(
    repo: MockContactRepo,
    notifier: Option<MockNotifier>,
    limiter: Arc<dyn RateLimiter>,
) -> web::Data<AppState> {
    web::Data::new(AppState::with_services(handler(repo, notifier), limiter))
}
