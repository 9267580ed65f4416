use crate::errors::AppError;
use crate::mailer::compose;
use crate::models::{ContactForm, Inquiry, RequestMeta, SubmissionResponse};
use crate::spam::is_spam;
use crate::state::AppState;
use crate::storage::TIMESTAMP_FORMAT;
use crate::validation::{sanitize_form, validate};
use crate::whatsapp;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

pub const ACCEPTED: &str = "Thank you for your inquiry! We will contact you soon.";

pub async fn process(
    state: &AppState,
    form: ContactForm,
    meta: RequestMeta,
) -> Result<SubmissionResponse, AppError> {
    process_at(state, form, meta, Local::now().naive_local(), Instant::now()).await
}

/// Validation, rate limit, spam gate, inquiry log, notification email.
pub async fn process_at(
    state: &AppState,
    form: ContactForm,
    meta: RequestMeta,
    now: NaiveDateTime,
    instant: Instant,
) -> Result<SubmissionResponse, AppError> {
    let form = sanitize_form(&form);

    let errors = validate(&form);
    if !errors.is_empty() {
        info!(ip = %meta.ip, count = errors.len(), "submission failed validation");
        return Err(AppError::Validation(errors));
    }

    // Released on every early return below; only a logged inquiry starts the cooldown.
    let Some(reservation) = state.limiter.reserve(&meta.client_key, instant) else {
        info!(client = %meta.client_key, "submission rate limited");
        return Err(AppError::RateLimited);
    };

    if is_spam(&form.name, &form.message) {
        warn!(ip = %meta.ip, "submission flagged as spam");
        return Err(AppError::Spam);
    }

    let inquiry = Inquiry {
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        name: form.name,
        phone: form.phone,
        service: form.service,
        message: form.message,
        ip: meta.ip,
        user_agent: meta.user_agent,
    };

    if let Err(err) = state.log.append(&inquiry, now).await {
        error!("failed to log inquiry: {err}");
        return Err(err);
    }
    reservation.commit();

    notify(state, &inquiry);
    info!("successful form submission from: {} ({})", inquiry.name, inquiry.phone);

    let text = whatsapp::build_message(
        &inquiry.name,
        &inquiry.phone,
        &inquiry.service,
        &inquiry.message,
    );
    Ok(SubmissionResponse::accepted(
        ACCEPTED,
        whatsapp::build_url(&state.config.whatsapp_number, &text),
    ))
}

fn notify(state: &AppState, inquiry: &Inquiry) {
    let email = compose(
        inquiry,
        &state.config.contact_email,
        &state.config.from_email,
    );
    let notifier = Arc::clone(&state.notifier);
    tokio::spawn(async move {
        if let Err(err) = notifier.send(&email).await {
            error!("email sending failed: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::{RATE_LIMITED, SPAM_FLAGGED};
    use crate::mailer::{Email, MailError, Notifier};
    use crate::storage::parse_record;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct ChannelNotifier {
        tx: mpsc::UnboundedSender<Email>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn send(&self, email: &Email) -> Result<(), MailError> {
            let _ = self.tx.send(email.clone());
            if self.fail {
                return Err(MailError::Spawn(std::io::Error::other("smtp down")));
            }
            Ok(())
        }
    }

    struct Harness {
        state: AppState,
        emails: mpsc::UnboundedReceiver<Email>,
        _dir: tempfile::TempDir,
    }

    fn harness(fail_mail: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().to_path_buf();
        harness_logging_to(dir, log_dir, fail_mail)
    }

    fn harness_logging_to(dir: tempfile::TempDir, log_dir: PathBuf, fail_mail: bool) -> Harness {
        let config = Config {
            log_dir,
            ..Config::default()
        };
        let (tx, emails) = mpsc::unbounded_channel();
        let notifier = Arc::new(ChannelNotifier { tx, fail: fail_mail });
        Harness {
            state: AppState::with_notifier(config, notifier),
            emails,
            _dir: dir,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn meta(client: &str) -> RequestMeta {
        RequestMeta {
            ip: "203.0.113.7".into(),
            user_agent: "Mozilla/5.0".into(),
            client_key: client.into(),
        }
    }

    fn form(name: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            phone: "9876543210".into(),
            service: "yoga".into(),
            message: message.into(),
        }
    }

    async fn logged_lines(state: &AppState) -> Vec<String> {
        match tokio::fs::read_to_string(state.log.path_for(now())).await {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn accepted_submission_is_logged_emailed_and_linked() {
        let mut h = harness(false);

        let response = process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), Instant::now())
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message, ACCEPTED);
        let url = response.whatsapp_url.unwrap();
        assert!(url.starts_with("https://wa.me/918209490538?text="));
        assert!(url.contains("Program+Interest%3A+Power+Yoga"));

        let lines = logged_lines(&h.state).await;
        assert_eq!(lines.len(), 1);
        let (stamp, inquiry) = parse_record(&lines[0]).unwrap();
        assert_eq!(stamp, "2026-03-14 09:30:00");
        assert_eq!(inquiry.name, "Asha");
        assert_eq!(inquiry.ip, "203.0.113.7");

        let email = tokio::time::timeout(Duration::from_secs(1), h.emails.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(email.body.contains("Name: Asha"));
    }

    #[tokio::test]
    async fn invalid_submission_has_no_side_effects() {
        let mut h = harness(false);
        let bad = ContactForm {
            name: "Jane123".into(),
            ..ContactForm::default()
        };

        let err = process_at(&h.state, bad, meta("203.0.113.7"), now(), Instant::now())
            .await
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "Phone number is required. Please select a service. Name should contain only letters and spaces."
        );
        assert!(logged_lines(&h.state).await.is_empty());
        assert!(h.emails.try_recv().is_err());

        // A rejected attempt does not start the cooldown.
        process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), Instant::now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn second_submission_within_window_is_rate_limited() {
        let h = harness(false);
        let start = Instant::now();

        process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), start)
            .await
            .unwrap();
        let err = process_at(
            &h.state,
            form("Asha", ""),
            meta("203.0.113.7"),
            now(),
            start + Duration::from_secs(30),
        )
        .await
        .unwrap_err();

        assert_eq!(err.public_message(), RATE_LIMITED);
        assert_eq!(logged_lines(&h.state).await.len(), 1);
    }

    #[tokio::test]
    async fn other_clients_are_not_rate_limited() {
        let h = harness(false);
        let start = Instant::now();

        process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), start)
            .await
            .unwrap();
        process_at(&h.state, form("Ravi", ""), meta("198.51.100.4"), now(), start)
            .await
            .unwrap();

        assert_eq!(logged_lines(&h.state).await.len(), 2);
    }

    #[tokio::test]
    async fn spam_is_rejected_before_logging() {
        let mut h = harness(false);

        let err = process_at(
            &h.state,
            form("Jane Doe", "Claim your FREE MONEY today"),
            meta("203.0.113.7"),
            now(),
            Instant::now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.public_message(), SPAM_FLAGGED);
        assert!(logged_lines(&h.state).await.is_empty());
        assert!(h.emails.try_recv().is_err());
    }

    #[tokio::test]
    async fn email_failure_is_not_surfaced() {
        let mut h = harness(true);

        let response = process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), Instant::now())
            .await
            .unwrap();

        assert!(response.success);
        assert!(
            tokio::time::timeout(Duration::from_secs(1), h.emails.recv())
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(logged_lines(&h.state).await.len(), 1);
    }

    #[tokio::test]
    async fn fields_are_sanitized_before_storage() {
        let h = harness(false);

        process_at(
            &h.state,
            form("  Asha  ", "<script>alert(1)</script>"),
            meta("203.0.113.7"),
            now(),
            Instant::now(),
        )
        .await
        .unwrap();

        let lines = logged_lines(&h.state).await;
        let (_, inquiry) = parse_record(&lines[0]).unwrap();
        assert_eq!(inquiry.name, "Asha");
        assert_eq!(inquiry.message, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[tokio::test]
    async fn spam_rejection_leaves_the_window_unused() {
        let h = harness(false);
        let start = Instant::now();

        let err = process_at(
            &h.state,
            form("Jane Doe", "free money"),
            meta("203.0.113.7"),
            now(),
            start,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Spam));

        process_at(
            &h.state,
            form("Jane Doe", "Is there a trial class?"),
            meta("203.0.113.7"),
            now(),
            start + Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(logged_lines(&h.state).await.len(), 1);
    }

    #[tokio::test]
    async fn log_failure_leaves_the_window_unused() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"occupied").unwrap();
        let mut h = harness_logging_to(dir, blocker, false);
        let start = Instant::now();

        let first = process_at(&h.state, form("Asha", ""), meta("203.0.113.7"), now(), start)
            .await
            .unwrap_err();
        assert!(matches!(first, AppError::Internal(_)));

        let retry = process_at(
            &h.state,
            form("Asha", ""),
            meta("203.0.113.7"),
            now(),
            start + Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(retry, AppError::Internal(_)));
        assert!(h.emails.try_recv().is_err());
    }
}
