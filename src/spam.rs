pub const SPAM_KEYWORDS: [&str; 7] = [
    "viagra",
    "casino",
    "lottery",
    "winner",
    "congratulations",
    "click here",
    "free money",
];

pub fn is_spam(name: &str, message: &str) -> bool {
    let text = format!("{name} {message}").to_lowercase();
    SPAM_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}
