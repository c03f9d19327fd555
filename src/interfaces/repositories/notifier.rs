use async_trait::async_trait;

use crate::{entities::contact::NewContactSubmission, errors::NotifyError};

#[async_trait]
pub trait ContactNotifier: Send + Sync {
    /// Sends the notification for an already stored submission
    async fn notify(&self, submission: &NewContactSubmission) -> Result<(), NotifyError>;
}
