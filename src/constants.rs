use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const RATE_LIMIT_WINDOW: Duration = Duration::from_millis(60_000);
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 3;

/// Largest contact body accepted, in bytes
pub const MAX_CONTACT_BODY_BYTES: usize = 64 * 1024;

/// Caller-facing texts. The site is French, so are these.
pub mod messages {
    pub const TOO_MANY_REQUESTS: &str = "Trop de requêtes. Veuillez réessayer plus tard.";
    pub const MALFORMED_BODY: &str = "Requête invalide";
    pub const PAYLOAD_TOO_LARGE: &str = "Requête trop volumineuse";
    pub const MISSING_FIELDS: &str = "Champs requis manquants";
    pub const INVALID_MESSAGE: &str = "Message invalide";
    pub const SUCCESS: &str = "Message envoyé avec succès";
    pub const SERVER_ERROR: &str = "Erreur serveur";
}
