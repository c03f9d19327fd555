use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::messages,
    entities::contact::{ContactForm, ContactResponse, NewContactSubmission},
    errors::AppError,
    repositories::{contact::ContactSubmissionRepository, notifier::ContactNotifier},
};

#[derive(Clone)]
pub struct ContactHandler {
    pub contact_repo: Arc<dyn ContactSubmissionRepository>,
    pub notifier: Option<Arc<dyn ContactNotifier>>,
}

impl ContactHandler {
    pub fn new(
        contact_repo: Arc<dyn ContactSubmissionRepository>,
        notifier: Option<Arc<dyn ContactNotifier>>,
    ) -> Self {
        ContactHandler { contact_repo, notifier }
    }

    /// Validates, stores, then notifies. Only storage failures are errors
    /// once validation has passed.
    pub async fn submit(&self, form: ContactForm) -> Result<ContactResponse, AppError> {
        let submission = NewContactSubmission::try_from(form)?;
        submission.validate()?;

        let stored = self.contact_repo.create_submission(&submission).await?;
        tracing::info!(submission_id = %stored.id, "Contact submission stored");

        self.notify(&submission).await;

        Ok(ContactResponse {
            message: messages::SUCCESS.to_string(),
        })
    }

    async fn notify(&self, submission: &NewContactSubmission) {
        let Some(notifier) = &self.notifier else {
            tracing::warn!(
                "SMTP not configured - email not sent. Set SMTP_USER, SMTP_PASS and SMTP_FROM"
            );
            return;
        };

        if let Err(e) = notifier.notify(submission).await {
            tracing::error!(error = %e, "Contact email sending failed");
        }
    }

    pub fn mail_enabled(&self) -> bool {
        self.notifier.is_some()
    }
}
