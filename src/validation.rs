use crate::models::ContactForm;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

/// Trim, drop backslash escapes, escape markup.
pub fn sanitize(input: &str) -> String {
    escape_html(&strip_slashes(input.trim()))
}

pub fn sanitize_form(form: &ContactForm) -> ContactForm {
    ContactForm {
        name: sanitize(&form.name),
        phone: sanitize(&form.phone),
        service: sanitize(&form.service),
        message: sanitize(&form.message),
    }
}

fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

pub fn phone_digit_count(phone: &str) -> usize {
    phone
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '+')
        .count()
}

pub fn is_valid_phone(phone: &str) -> bool {
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&phone_digit_count(phone))
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

pub fn validate(form: &ContactForm) -> Vec<String> {
    let mut errors = Vec::new();

    if form.name.is_empty() {
        errors.push("Name is required.".to_string());
    }
    if form.phone.is_empty() {
        errors.push("Phone number is required.".to_string());
    }
    if form.service.is_empty() {
        errors.push("Please select a service.".to_string());
    }
    if !form.phone.is_empty() && !is_valid_phone(&form.phone) {
        errors.push("Please enter a valid phone number.".to_string());
    }
    if !form.name.is_empty() && !is_valid_name(&form.name) {
        errors.push("Name should contain only letters and spaces.".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, phone: &str, service: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            phone: phone.into(),
            service: service.into(),
            message: String::new(),
        }
    }

    #[test]
    fn sanitize_trims_unescapes_and_escapes_markup() {
        assert_eq!(sanitize("  Jane  "), "Jane");
        assert_eq!(sanitize(r"O\'Brien"), "O&#039;Brien");
        assert_eq!(sanitize(r"a\\b"), r"a\b");
        assert_eq!(sanitize("<b>hi</b> & co"), "&lt;b&gt;hi&lt;/b&gt; &amp; co");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = validate(&form("", "", ""));
        assert_eq!(
            errors,
            vec![
                "Name is required.",
                "Phone number is required.",
                "Please select a service.",
            ]
        );
    }

    #[test]
    fn only_the_missing_field_is_reported() {
        let errors = validate(&form("Jane Doe", "9876543210", ""));
        assert_eq!(errors, vec!["Please select a service."]);
    }

    #[test]
    fn phone_length_bounds() {
        assert!(!is_valid_phone("987654321"));
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(is_valid_phone("(987) 654-3210"));
    }

    #[test]
    fn name_allows_letters_and_spaces_only() {
        assert!(is_valid_name("Jane Doe"));
        assert!(!is_valid_name("Jane123"));

        let errors = validate(&form("Jane123", "9876543210", "yoga"));
        assert_eq!(errors, vec!["Name should contain only letters and spaces."]);
    }

    #[test]
    fn invalid_phone_and_name_are_reported_together() {
        let errors = validate(&form("R2D2", "12345", "zumba"));
        assert_eq!(
            errors.join(" "),
            "Please enter a valid phone number. Name should contain only letters and spaces."
        );
    }
}
