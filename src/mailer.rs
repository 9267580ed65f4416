use crate::config::{Config, MailTransport};
use crate::models::{service_label, Inquiry};
use async_trait::async_trait;
use std::{path::PathBuf, process::Stdio, sync::Arc};
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::info;

pub const SUBJECT: &str = "New Inquiry from U-Can Fitness Studio Website";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to run mail program: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("mail program exited with {0}")]
    Exit(std::process::ExitStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    /// RFC 5322 text handed to `sendmail -t`.
    pub fn to_rfc822(&self) -> String {
        format!(
            "To: {}\r\nFrom: {}\r\nReply-To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.to, self.from, self.reply_to, self.subject, self.body
        )
    }
}

pub fn compose(inquiry: &Inquiry, to: &str, from: &str) -> Email {
    let mut body = String::from("New fitness inquiry from website:\n\n");
    body.push_str(&format!("Name: {}\n", inquiry.name));
    body.push_str(&format!("Phone: {}\n", inquiry.phone));
    body.push_str(&format!("Service Interest: {}\n", service_label(&inquiry.service)));
    if !inquiry.message.is_empty() {
        body.push_str(&format!("Message: {}\n", inquiry.message));
    }
    body.push_str(&format!("\nDate: {}\n", inquiry.timestamp));
    body.push_str(&format!("IP Address: {}\n", inquiry.ip));
    body.push_str(&format!("User Agent: {}\n", inquiry.user_agent));

    Email {
        to: to.to_string(),
        from: from.to_string(),
        reply_to: to.to_string(),
        subject: SUBJECT.to_string(),
        body,
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

pub struct SendmailNotifier {
    program: PathBuf,
}

impl SendmailNotifier {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Notifier for SendmailNotifier {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let mut child = Command::new(&self.program)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(email.to_rfc822().as_bytes()).await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(MailError::Exit(status));
        }
        Ok(())
    }
}

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        info!(to = %email.to, subject = %email.subject, "email (log transport)\n{}", email.body);
        Ok(())
    }
}

pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _email: &Email) -> Result<(), MailError> {
        Ok(())
    }
}

pub fn notifier_for(config: &Config) -> Arc<dyn Notifier> {
    match config.mail_transport {
        MailTransport::Sendmail => Arc::new(SendmailNotifier::new(config.sendmail_path.clone())),
        MailTransport::Log => Arc::new(LogNotifier),
        MailTransport::Disabled => Arc::new(DisabledNotifier),
    }
}
