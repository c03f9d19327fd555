mod test_utils;

use contact_backend::{entities::contact::ContactForm, errors::AppError};
use test_utils::*;

fn form() -> ContactForm {
    serde_json::from_value(valid_form()).unwrap()
}

#[tokio::test]
async fn stores_then_notifies() {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify()
        .withf(|s| *s == valid_submission())
        .times(1)
        .returning(|_| Ok(()));

    let handler = handler(repo_storing(1), Some(notifier));

    let response = handler.submit(form()).await.unwrap();
    assert_eq!(response.message, contact_backend::constants::messages::SUCCESS);
    assert!(handler.mail_enabled());
}

#[tokio::test]
async fn validation_failure_skips_storage_and_mail() {
    let handler = handler(repo_untouched(), Some(notifier_untouched()));

    let mut missing = form();
    missing.email = None;
    assert!(matches!(handler.submit(missing).await, Err(AppError::MissingFields(f)) if f == vec!["email"]));

    let mut short = form();
    short.message = Some("Trop court".chars().take(9).collect());
    assert!(matches!(handler.submit(short).await, Err(AppError::InvalidMessage(_))));
}

#[tokio::test]
async fn storage_error_propagates() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_submission()
        .times(1)
        .returning(|_| Err(AppError::Database("disk full".into())));

    let handler = handler(repo, Some(notifier_untouched()));

    assert!(matches!(handler.submit(form()).await, Err(AppError::Database(_))));
}
