use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::SmtpConfig;

/// Delivers approval requests to the administrator.
///
/// Dispatch is fire-and-forget from the caller's perspective; a transport
/// failure never rolls back account creation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn approval_requested(&self, email: &str, approve_url: &str) -> anyhow::Result<()>;
}

pub(crate) fn approval_email_body(email: &str, approve_url: &str) -> String {
    format!("New user wants access:\n\nEmail: {email}\nClick below to approve:\n{approve_url}\n")
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    admin: Mailbox,
}

impl SmtpNotifier {
    pub fn new(cfg: &SmtpConfig, admin_email: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
            .port(cfg.port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .build();
        Ok(Self {
            transport,
            sender: cfg.username.parse()?,
            admin: admin_email.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn approval_requested(&self, email: &str, approve_url: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.admin.clone())
            .subject("New User Request")
            .body(approval_email_body(email, approve_url))?;
        self.transport.send(message).await?;
        info!(%email, "approval request sent");
        Ok(())
    }
}

/// Used when no SMTP relay is configured, and as the test double. The
/// approval link still lands in the logs so the flow stays exercisable.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn approval_requested(&self, email: &str, approve_url: &str) -> anyhow::Result<()> {
        info!(%email, %approve_url, "new pending account");
        Ok(())
    }
}
