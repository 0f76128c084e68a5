use crate::config::SmtpConfig;

/// Outbound mail client settings.
///
/// Holds the SMTP endpoint, credentials and sender identity. Message
/// delivery is handled by the transport that consumes these settings.
#[derive(Debug, Clone)]
pub struct Mailer {
    smtp: SmtpConfig,
}

impl Mailer {
    pub fn new(smtp: &SmtpConfig) -> Self {
        Self { smtp: smtp.clone() }
    }

    /// `host:port` of the SMTP server.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.smtp.host, self.smtp.port)
    }

    pub fn sender(&self) -> &str {
        &self.smtp.sender
    }

    /// Returns true if both a username and a password were configured.
    pub fn has_credentials(&self) -> bool {
        !self.smtp.username.is_empty() && !self.smtp.password.is_empty()
    }
}
