use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

/// Raw contact form body, before any presence check.
///
/// `company`, `service` and `budget` take any JSON value; non-strings are
/// kept as their JSON text.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ContactForm {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "any_as_text")]
    pub company: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "any_as_text")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "any_as_text")]
    pub budget: Option<String>,
    pub message: Option<String>,
}

fn any_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A submission whose required fields are present. Still has to pass
/// [`Validate`] before it may be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewContactSubmission {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub service: Option<String>,
    pub budget: Option<String>,

    // Counted in chars, not bytes
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

impl TryFrom<ContactForm> for NewContactSubmission {
    type Error = AppError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        let name = present(form.name);
        let email = present(form.email);
        let message = present(form.message);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(NewContactSubmission {
                name,
                company: form.company,
                email,
                service: form.service,
                budget: form.budget,
                message,
            }),
            (name, email, message) => {
                let missing = [("name", name.is_none()), ("email", email.is_none()), ("message", message.is_none())]
                    .into_iter()
                    .filter_map(|(field, absent)| absent.then_some(field))
                    .collect();
                Err(AppError::MissingFields(missing))
            }
        }
    }
}

impl NewContactSubmission {
    /// Optional fields worth showing: present and non-empty.
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref().filter(|v| !v.is_empty())
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref().filter(|v| !v.is_empty())
    }

    pub fn budget(&self) -> Option<&str> {
        self.budget.as_deref().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

/// Result of a stored submission, as reported by the repository.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredSubmission {
    pub id: Uuid,
}
