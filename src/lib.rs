use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;

pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, limiter, mail, utils};

use limiter::rate_limiter::{FixedWindowRateLimiter, RateLimiter};
use mail::smtp::SmtpNotifier;
use repositories::{notifier::ContactNotifier, sqlx_repo::SqlxContactRepo};
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: ContactHandler,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let contact_repo = Arc::new(SqlxContactRepo::new(pool));

        let notifier = config.mail.as_ref().and_then(|mail| {
            SmtpNotifier::new(mail)
                .map(|n| Arc::new(n) as Arc<dyn ContactNotifier>)
                .map_err(|e| tracing::error!("SMTP transport setup failed, notifications disabled: {}", e))
                .ok()
        });

        AppState::with_services(
            ContactHandler::new(contact_repo, notifier),
            Arc::new(FixedWindowRateLimiter::default()),
        )
    }

    pub fn with_services(contact_handler: ContactHandler, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        AppState {
            contact_handler,
            rate_limiter,
        }
    }
}
