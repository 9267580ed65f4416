use serde::{Deserialize, Serialize};

/// Programs offered on the contact form's `service` select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Trampoline,
    Zumba,
    Hiit,
    Aerobics,
    Yoga,
    Meditation,
    All,
}

impl Service {
    pub const ALL: [Service; 7] = [
        Service::Trampoline,
        Service::Zumba,
        Service::Hiit,
        Service::Aerobics,
        Service::Yoga,
        Service::Meditation,
        Service::All,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.value() == value)
    }

    pub fn value(self) -> &'static str {
        match self {
            Service::Trampoline => "trampoline",
            Service::Zumba => "zumba",
            Service::Hiit => "hiit",
            Service::Aerobics => "aerobics",
            Service::Yoga => "yoga",
            Service::Meditation => "meditation",
            Service::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::Trampoline => "Trampoline Zumba",
            Service::Zumba => "Zumba Fitness",
            Service::Hiit => "HIIT Training",
            Service::Aerobics => "Aerobics",
            Service::Yoga => "Power Yoga",
            Service::Meditation => "Meditation",
            Service::All => "All Programs",
        }
    }
}

pub fn service_label(value: &str) -> &str {
    Service::parse(value).map(Service::label).unwrap_or(value)
}

/// Raw form body as posted by the browser. Missing fields become empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip: String,
    pub user_agent: String,
    pub client_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub ip: String,
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
}

impl SubmissionResponse {
    pub fn accepted(message: impl Into<String>, whatsapp_url: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            whatsapp_url: Some(whatsapp_url),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            whatsapp_url: None,
        }
    }
}
