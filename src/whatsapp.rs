use crate::models::service_label;
use url::form_urlencoded;

const GREETING: &str = "Hi! I'm interested in joining U-Can Fitness Studio.";
const CLOSING: &str = "Please contact me for more information about classes and schedules.";

pub fn build_message(name: &str, phone: &str, service: &str, message: &str) -> String {
    let mut text = format!("{GREETING}\n\n");
    text.push_str(&format!("Name: {name}\n"));
    text.push_str(&format!("Phone: {phone}\n"));
    text.push_str(&format!("Program Interest: {}\n", service_label(service)));
    if !message.is_empty() {
        text.push_str(&format!("Message: {message}\n"));
    }
    text.push('\n');
    text.push_str(CLOSING);
    text
}

/// `https://wa.me/<number>?text=...`, encoded the way HTML forms are.
pub fn build_url(number: &str, text: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    format!("https://wa.me/{number}?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_program_label_and_skips_empty_message() {
        let text = build_message("Asha", "9876543210", "yoga", "");
        assert!(text.contains("Program Interest: Power Yoga"));
        assert!(text.contains("Name: Asha\n"));
        assert!(!text.contains("Message:"));
        assert!(text.ends_with(CLOSING));
    }

    #[test]
    fn message_line_present_when_given() {
        let text = build_message("Asha", "9876543210", "hiit", "Morning slots?");
        assert!(text.contains("Program Interest: HIIT Training\nMessage: Morning slots?\n"));
    }

    #[test]
    fn url_is_form_encoded() {
        let url = build_url("918209490538", "Hi there!\nName: A&B");
        assert_eq!(
            url,
            "https://wa.me/918209490538?text=Hi+there%21%0AName%3A+A%26B"
        );
    }
}
