use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    entities::contact::NewContactSubmission,
    errors::NotifyError,
    repositories::notifier::ContactNotifier,
    settings::MailConfig,
};

#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    recipient: String,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.as_str().to_owned(),
        );

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(TlsParameters::new(config.host.clone())?))
        };

        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(SmtpNotifier {
            transport,
            from: config.from.parse()?,
            to: config.recipient.parse()?,
            recipient: config.recipient.clone(),
        })
    }
}

#[async_trait]
impl ContactNotifier for SmtpNotifier {
    async fn notify(&self, submission: &NewContactSubmission) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification_subject(submission))
            .header(ContentType::TEXT_HTML)
            .body(render_notification(submission))?;

        let response = self.transport.send(email).await?;
        if !response.is_positive() {
            return Err(NotifyError::Rejected(response.code().to_string()));
        }

        tracing::info!(recipient = %self.recipient, "Contact email sent");
        Ok(())
    }
}

pub fn notification_subject(submission: &NewContactSubmission) -> String {
    format!("Nouveau message de contact - {}", submission.name)
}

/// HTML body of the notification. User input is escaped; empty optional
/// fields are left out.
pub fn render_notification(submission: &NewContactSubmission) -> String {
    let line = |label: &str, value: &str| {
        format!("<p><strong>{}:</strong> {}</p>\n", label, ammonia::clean_text(value))
    };

    let mut html = String::from("<h2>Nouveau message de contact</h2>\n");
    html.push_str(&line("Nom", &submission.name));
    if let Some(company) = submission.company() {
        html.push_str(&line("Entreprise", company));
    }
    html.push_str(&line("Email", &submission.email));
    if let Some(service) = submission.service() {
        html.push_str(&line("Service", service));
    }
    if let Some(budget) = submission.budget() {
        html.push_str(&line("Budget", budget));
    }
    html.push_str("<p><strong>Message:</strong></p>\n");
    html.push_str(&format!("<p>{}</p>\n", ammonia::clean_text(&submission.message)));

    html
}
