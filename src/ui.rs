use crate::config::Config;
use crate::models::Service;

pub fn render_index(config: &Config) -> String {
    INDEX_HTML
        .replace("{{CLIENT_MODE}}", config.client_mode.as_str())
        .replace("{{WHATSAPP_NUMBER}}", &config.whatsapp_number)
        .replace("{{SERVICE_OPTIONS}}", &service_options())
        .replace("{{SERVICE_LABELS}}", &service_labels_json())
}

fn service_options() -> String {
    Service::ALL
        .iter()
        .map(|service| {
            format!(
                r#"<option value="{}">{}</option>"#,
                service.value(),
                service.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n              ")
}

fn service_labels_json() -> String {
    let labels: serde_json::Map<String, serde_json::Value> = Service::ALL
        .iter()
        .map(|service| (service.value().to_string(), service.label().into()))
        .collect();
    serde_json::Value::Object(labels).to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>U-Can Fitness Studio</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #101418;
      --bg-2: #1f2a36;
      --ink: #f4f1ea;
      --muted: #a9b4c0;
      --accent: #ff6b4a;
      --ok: #3ecf8e;
      --bad: #ff5c5c;
      --card: rgba(255, 255, 255, 0.06);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #182029 60%, #0c0f12 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    form {
      display: grid;
      gap: 16px;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    input, select, textarea {
      font: inherit;
      padding: 12px 14px;
      border-radius: 14px;
      border: 1px solid rgba(255, 255, 255, 0.15);
      background: rgba(0, 0, 0, 0.25);
      color: var(--ink);
    }

    .error {
      border-color: var(--bad);
    }

    .field-error {
      color: var(--bad);
      font-size: 0.85rem;
    }

    .btn-submit {
      font: inherit;
      font-weight: 600;
      padding: 14px;
      border: none;
      border-radius: 999px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
    }

    .btn-submit:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .success-message, .error-message {
      padding: 12px 16px;
      border-radius: 14px;
    }

    .success-message {
      background: rgba(62, 207, 142, 0.15);
      color: var(--ok);
    }

    .error-message {
      background: rgba(255, 92, 92, 0.15);
      color: var(--bad);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>U-Can Fitness Studio</h1>
      <p class="subtitle">Tell us what you'd like to try and we'll get back to you on WhatsApp.</p>
    </header>

    <section>
      <form id="contactFormEnhanced" data-mode="{{CLIENT_MODE}}" data-whatsapp="{{WHATSAPP_NUMBER}}" action="/contact" method="post" novalidate>
        <div class="field">
          <label for="name">Name</label>
          <input id="name" name="name" type="text" required />
        </div>
        <div class="field">
          <label for="phone">Phone</label>
          <input id="phone" name="phone" type="tel" required />
        </div>
        <div class="field">
          <label for="service">Program</label>
          <select id="service" name="service" required>
            <option value="">Select a program</option>
            {{SERVICE_OPTIONS}}
          </select>
        </div>
        <div class="field">
          <label for="message">Message (optional)</label>
          <textarea id="message" name="message" rows="4"></textarea>
        </div>
        <button class="btn-submit" type="submit">Send inquiry</button>
      </form>
    </section>
  </main>

  <script>
    const SERVICE_LABELS = {{SERVICE_LABELS}};
    const REDIRECT_DELAY_MS = 2000;
    const FALLBACK_DELAY_MS = 1000;
    const MESSAGE_TTL_MS = 5000;

    const contactForm = document.getElementById('contactFormEnhanced');
    const mode = contactForm.dataset.mode;
    const whatsappNumber = contactForm.dataset.whatsapp;
    const submitBtn = contactForm.querySelector('.btn-submit');
    const inputs = contactForm.querySelectorAll('input, select, textarea');

    const phoneRegex = /^[+]?[0-9]{10,15}$/;
    const emailRegex = /^[^\s@]+@[^\s@]+\.[^\s@]+$/;

    const showFieldError = (field, message) => {
      field.classList.add('error');
      let errorEl = field.parentNode.querySelector('.field-error');
      if (!errorEl) {
        errorEl = document.createElement('div');
        errorEl.className = 'field-error';
        field.parentNode.appendChild(errorEl);
      }
      errorEl.textContent = message;
    };

    const clearFieldError = (field) => {
      field.classList.remove('error');
      const errorEl = field.parentNode.querySelector('.field-error');
      if (errorEl) {
        errorEl.remove();
      }
    };

    const validateField = (field) => {
      const value = field.value.trim();
      clearFieldError(field);

      if (field.required && !value) {
        showFieldError(field, 'This field is required');
        return false;
      }
      if (field.type === 'tel' && value && !phoneRegex.test(value.replace(/\s+/g, ''))) {
        showFieldError(field, 'Please enter a valid phone number');
        return false;
      }
      if (field.type === 'email' && value && !emailRegex.test(value)) {
        showFieldError(field, 'Please enter a valid email address');
        return false;
      }
      return true;
    };

    const validateForm = () => {
      let valid = true;
      inputs.forEach((input) => {
        if (!validateField(input)) {
          valid = false;
        }
      });
      return valid;
    };

    const buildWhatsAppUrl = (formData) => {
      const service = formData.get('service');
      const message = (formData.get('message') || '').trim();
      let text = "Hi! I'm interested in joining U-Can Fitness Studio.\n\n";
      text += `Name: ${formData.get('name')}\n`;
      text += `Phone: ${formData.get('phone')}\n`;
      text += `Program Interest: ${SERVICE_LABELS[service] || service}\n`;
      if (message) {
        text += `Message: ${message}\n`;
      }
      text += '\nPlease contact me for more information about classes and schedules.';
      return `https://wa.me/${whatsappNumber}?text=${encodeURIComponent(text)}`;
    };

    const openLater = (url, delay) => {
      setTimeout(() => window.open(url, '_blank'), delay);
    };

    const showMessage = (message, type) => {
      document.querySelectorAll('.success-message, .error-message').forEach((el) => el.remove());
      const messageEl = document.createElement('div');
      messageEl.className = type === 'success' ? 'success-message' : 'error-message';
      messageEl.textContent = message;
      contactForm.parentNode.insertBefore(messageEl, contactForm);
      messageEl.scrollIntoView({ behavior: 'smooth', block: 'center' });
      setTimeout(() => messageEl.remove(), MESSAGE_TTL_MS);
    };

    const setLoading = (loading) => {
      submitBtn.classList.toggle('loading', loading);
      submitBtn.disabled = loading;
    };

    const submitOptimistic = (formData) => {
      const url = buildWhatsAppUrl(formData);
      showMessage('Thank you! Your message has been received. Redirecting to WhatsApp...', 'success');
      contactForm.reset();
      setTimeout(() => setLoading(false), FALLBACK_DELAY_MS);
      openLater(url, REDIRECT_DELAY_MS);
    };

    const submitToServer = async (formData) => {
      try {
        const res = await fetch(contactForm.action, {
          method: 'POST',
          body: new URLSearchParams(formData)
        });
        const result = await res.json();

        if (result.success) {
          showMessage('Thank you! Your message has been sent successfully. Redirecting to WhatsApp...', 'success');
          contactForm.reset();
          openLater(result.whatsapp_url || buildWhatsAppUrl(formData), REDIRECT_DELAY_MS);
        } else {
          showMessage(result.message || 'Sorry, there was an error. Please try again.', 'error');
        }
      } catch (err) {
        console.error('Form submission error:', err);
        showMessage('Network error. Redirecting to WhatsApp...', 'error');
        openLater(buildWhatsAppUrl(formData), FALLBACK_DELAY_MS);
      } finally {
        setLoading(false);
      }
    };

    inputs.forEach((input) => {
      input.addEventListener('blur', () => validateField(input));
      input.addEventListener('input', () => clearFieldError(input));
    });

    contactForm.addEventListener('submit', (event) => {
      event.preventDefault();
      if (!validateForm()) {
        return;
      }

      const formData = new FormData(contactForm);
      setLoading(true);

      if (mode === 'optimistic') {
        submitOptimistic(formData);
      } else {
        submitToServer(formData);
      }
    });
  </script>
</body>
</html>
"#;
