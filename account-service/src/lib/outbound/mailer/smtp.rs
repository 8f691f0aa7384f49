use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::message::MultiPart;
use lettre::message::SinglePart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use super::templates;
use crate::config::SmtpConfig;
use crate::user::errors::MailerError;
use crate::user::ports::Mailer;

/// SMTP implementation of the mailer port.
///
/// Delivery is attempted once per call; any retry policy lives in the
/// surrounding infrastructure, not here.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build an SMTP transport from configuration.
    ///
    /// # Errors
    /// * `InvalidAddress` - The configured sender address does not parse
    /// * `SendFailed` - The relay could not be configured
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailerError::SendFailed(e.to_string()))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .port(config.port)
            .build();

        let from = config
            .from
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("{}: {}", config.from, e)))?;

        Ok(Self { transport, from })
    }

    async fn dispatch(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailerError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("{}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.to_string()),
                    ),
            )
            .map_err(|e| MailerError::BuildFailed(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_otp_email(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), MailerError> {
        let text = format!("Your OTP is {}", code);
        let html = templates::otp_email(recipient_name, code);

        self.dispatch(to, "Password Reset OTP", &text, &html).await
    }
}
