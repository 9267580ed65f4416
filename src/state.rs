use crate::config::Config;
use crate::mailer::{notifier_for, Notifier};
use crate::rate_limit::RateLimiter;
use crate::storage::InquiryLog;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub limiter: Arc<RateLimiter>,
    pub log: Arc<InquiryLog>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let notifier = notifier_for(&config);
        Self::with_notifier(config, notifier)
    }

    pub fn with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::new(config.rate_limit_window)),
            log: Arc::new(InquiryLog::new(config.log_dir.clone())),
            config: Arc::new(config),
            notifier,
        }
    }
}
