use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport {
    /// Pipe the message to the local `sendmail -t`.
    Sendmail,
    /// Write the message to the tracing log only.
    Log,
    Disabled,
}

impl FromStr for MailTransport {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sendmail" => Ok(Self::Sendmail),
            "log" => Ok(Self::Log),
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            other => Err(format!("unknown mail transport '{other}'")),
        }
    }
}

/// How the rendered contact form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMode {
    /// POST to the server and wait for its verdict before redirecting.
    Server,
    /// Skip the server, report success locally and redirect.
    Optimistic,
}

impl ClientMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientMode::Server => "server",
            ClientMode::Optimistic => "optimistic",
        }
    }
}

impl FromStr for ClientMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "optimistic" | "local" => Ok(Self::Optimistic),
            other => Err(format!("unknown client mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_dir: PathBuf,
    pub contact_email: String,
    pub from_email: String,
    pub whatsapp_number: String,
    pub rate_limit_window: Duration,
    pub mail_transport: MailTransport,
    pub sendmail_path: PathBuf,
    pub client_mode: ClientMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            log_dir: PathBuf::from("logs"),
            contact_email: "info@ucanfitnessstudio.com".to_string(),
            from_email: "website@ucanfitnessstudio.com".to_string(),
            whatsapp_number: "918209490538".to_string(),
            rate_limit_window: Duration::from_secs(60),
            mail_transport: MailTransport::Log,
            sendmail_path: PathBuf::from("sendmail"),
            client_mode: ClientMode::Server,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: load("PORT", defaults.port),
            log_dir: load("INQUIRY_LOG_DIR", defaults.log_dir),
            contact_email: load("CONTACT_EMAIL", defaults.contact_email),
            from_email: load("FROM_EMAIL", defaults.from_email),
            whatsapp_number: load("WHATSAPP_NUMBER", defaults.whatsapp_number),
            rate_limit_window: Duration::from_secs(load(
                "RATE_LIMIT_SECS",
                defaults.rate_limit_window.as_secs(),
            )),
            mail_transport: load("MAIL_TRANSPORT", defaults.mail_transport),
            sendmail_path: load("SENDMAIL_PATH", defaults.sendmail_path),
            client_mode: load("CLIENT_MODE", defaults.client_mode),
        }
    }
}

fn load<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(err) => {
                warn!("invalid {key} value '{raw}': {err}, using default {default:?}");
                default
            }
        },
        Err(_) => {
            info!("{key} not set, using default: {default:?}");
            default
        }
    }
}
