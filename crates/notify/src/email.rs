//! Email notification delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration
//! is loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be
//! constructed -- callers treat missing email config as "delivery disabled",
//! never as an error.

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@reelhouse.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Where distributor application notifications are sent.
    pub applications_inbox: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable             | Required | Default                     |
    /// |----------------------|----------|-----------------------------|
    /// | `SMTP_HOST`          | yes      | —                           |
    /// | `SMTP_PORT`          | no       | `587`                       |
    /// | `SMTP_FROM`          | no       | `noreply@reelhouse.local`   |
    /// | `APPLICATIONS_INBOX` | no       | same as `SMTP_FROM`         |
    /// | `SMTP_USER`          | no       | —                           |
    /// | `SMTP_PASSWORD`      | no       | —                           |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            applications_inbox: std::env::var("APPLICATIONS_INBOX")
                .unwrap_or_else(|_| from_address.clone()),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Application notification
// ---------------------------------------------------------------------------

/// The distributor application fields carried in the notification email.
#[derive(Debug, Clone)]
pub struct ApplicationNotification {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub portfolio_url: Option<String>,
    pub distribution_plan: String,
    pub target_films: String,
    pub target_customers: i64,
    pub timeline_months: i32,
    pub experience: Option<String>,
    pub social_media_links: Option<String>,
    pub additional_info: Option<String>,
}

/// Render the subject and plain-text body for an application notification.
pub fn application_email(application: &ApplicationNotification) -> (String, String) {
    fn or_not_provided(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("Not provided")
    }

    let subject = format!("New distributor application: {}", application.full_name);
    let body = format!(
        "New Distributor Application\n\
         \n\
         Applicant\n\
         - Name: {}\n\
         - Email: {}\n\
         - Phone: {}\n\
         - Portfolio: {}\n\
         \n\
         Distribution Plan\n\
         - Target films: {}\n\
         - Target customers: {}\n\
         - Timeline: {} months\n\
         \n\
         Strategy\n\
         {}\n\
         \n\
         Experience & Background\n\
         {}\n\
         \n\
         Social Media Links\n\
         {}\n\
         \n\
         Additional Information\n\
         {}\n",
        application.full_name,
        application.email,
        or_not_provided(&application.phone),
        or_not_provided(&application.portfolio_url),
        application.target_films,
        application.target_customers,
        application.timeline_months,
        application.distribution_plan,
        or_not_provided(&application.experience),
        or_not_provided(&application.social_media_links),
        or_not_provided(&application.additional_info),
    );
    (subject, body)
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends notification emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    /// Create a new email delivery service with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send a distributor application notification to the review inbox.
    ///
    /// Reply-to is set to the applicant so reviewers can respond directly.
    pub async fn deliver_application(
        &self,
        application: &ApplicationNotification,
    ) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let (subject, body) = application_email(application);

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.applications_inbox.parse()?)
            .reply_to(application.email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            applicant = %application.email,
            "Distributor application notification sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_application() -> ApplicationNotification {
        ApplicationNotification {
            full_name: "Amina Wekesa".into(),
            email: "amina@example.com".into(),
            phone: None,
            portfolio_url: Some("https://amina.example.com".into()),
            distribution_plan: "Campus screenings across Nairobi universities.".into(),
            target_films: "East African drama".into(),
            target_customers: 250,
            timeline_months: 6,
            experience: None,
            social_media_links: None,
            additional_info: None,
        }
    }

    #[test]
    fn subject_names_the_applicant() {
        let (subject, _) = application_email(&sample_application());
        assert_eq!(subject, "New distributor application: Amina Wekesa");
    }

    #[test]
    fn body_carries_all_fields_with_not_provided_blanks() {
        let (_, body) = application_email(&sample_application());
        assert!(body.contains("Name: Amina Wekesa"));
        assert!(body.contains("Email: amina@example.com"));
        assert!(body.contains("Phone: Not provided"));
        assert!(body.contains("Portfolio: https://amina.example.com"));
        assert!(body.contains("Target customers: 250"));
        assert!(body.contains("Timeline: 6 months"));
        assert!(body.contains("Campus screenings"));
        assert!(body.contains("Experience & Background\nNot provided"));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
