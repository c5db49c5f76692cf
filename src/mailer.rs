use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::debug;

use crate::config::SmtpConfig;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// STARTTLS relay delivering to the configured administrative recipient.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());
        let transport = SmtpTransport::starttls_relay(&cfg.host)
            .context("create SMTP relay")?
            .credentials(creds)
            .port(cfg.port)
            .build();
        let from: Mailbox = cfg.from.parse().context("invalid SMTP_FROM address")?;
        let to: Mailbox = cfg
            .alert_recipient
            .parse()
            .context("invalid ALERT_RECIPIENT address")?;
        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("build email")?;
        self.transport.send(email).await.context("send email")?;
        Ok(())
    }
}

/// Stands in when SMTP is not configured and in tests.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, subject: &str, _body: &str) -> anyhow::Result<()> {
        debug!(subject, "mailer disabled; dropping notification");
        Ok(())
    }
}
