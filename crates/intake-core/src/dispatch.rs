//! Outbound contact links built from enquiry fields.
//!
//! Everything here is pure: no network I/O happens, and opening a link is the
//! caller's business. The same input always yields the same URL.

use serde::{Deserialize, Serialize};

use crate::{enquiry::Enquiry, error::ContactError};

/// Build a `https://wa.me/` deep link.
///
/// Every non-digit in `phone` is dropped, so `"+91 98765-43210"` becomes
/// `919876543210`. The message is percent-encoded into the `text` parameter.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<String, ContactError> {
  let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
  if digits.is_empty() {
    return Err(ContactError::NoPhoneDigits);
  }
  Ok(format!(
    "https://wa.me/{digits}?text={}",
    urlencoding::encode(message)
  ))
}

/// Build a `mailto:` link with an encoded subject and body.
///
/// Only emptiness is checked; the address syntax is not validated.
pub fn email_link(
  email: &str,
  subject: &str,
  body: &str,
) -> Result<String, ContactError> {
  let email = email.trim();
  if email.is_empty() {
    return Err(ContactError::EmptyEmail);
  }
  // `@` stays literal; everything else that could end the address or start
  // a header field (`?`, `&`, `#`, `%`, whitespace) is escaped.
  let address = urlencoding::encode(email).replace("%40", "@");
  Ok(format!(
    "mailto:{address}?subject={}&body={}",
    urlencoding::encode(subject),
    urlencoding::encode(body)
  ))
}

// ─── Templates ───────────────────────────────────────────────────────────────

/// Message templates for outbound contact. `{name}` and `{course}` are
/// replaced with the enquiry's full name and course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactTemplates {
  pub whatsapp:      String,
  pub email_subject: String,
  pub email_body:    String,
}

impl Default for ContactTemplates {
  fn default() -> Self {
    Self {
      whatsapp:      "Hi {name}, thanks for your enquiry about {course}. \
                      When is a good time to talk?"
        .into(),
      email_subject: "Your enquiry about {course}".into(),
      email_body:    "Hi {name},\n\nThank you for your interest in {course}. \
                      We'd love to tell you more about it.\n"
        .into(),
    }
  }
}

impl ContactTemplates {
  /// Substitute the enquiry's details into `template`.
  pub fn render(template: &str, enquiry: &Enquiry) -> String {
    let course = enquiry
      .course_interest
      .as_deref()
      .or(enquiry.course_id.as_deref())
      .unwrap_or("our courses");
    template
      .replace("{name}", &enquiry.full_name)
      .replace("{course}", course)
  }
}

// ─── Links for an enquiry ────────────────────────────────────────────────────

/// One outbound link, or the reason it could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactLink {
  Ready { url: String },
  Unavailable { error: String },
}

impl From<Result<String, ContactError>> for ContactLink {
  fn from(result: Result<String, ContactError>) -> Self {
    match result {
      Ok(url) => Self::Ready { url },
      Err(e) => Self::Unavailable { error: e.to_string() },
    }
  }
}

impl ContactLink {
  pub fn url(&self) -> Option<&str> {
    match self {
      Self::Ready { url } => Some(url),
      Self::Unavailable { .. } => None,
    }
  }
}

/// Both contact actions for one enquiry. Each is built independently, so an
/// unusable phone number never hides the e-mail link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinks {
  pub whatsapp: ContactLink,
  pub email:    ContactLink,
}

pub fn contact_links(enquiry: &Enquiry, templates: &ContactTemplates) -> ContactLinks {
  let whatsapp = whatsapp_link(
    enquiry.phone.as_deref().unwrap_or_default(),
    &ContactTemplates::render(&templates.whatsapp, enquiry),
  );
  let email = email_link(
    &enquiry.email,
    &ContactTemplates::render(&templates.email_subject, enquiry),
    &ContactTemplates::render(&templates.email_body, enquiry),
  );
  ContactLinks { whatsapp: whatsapp.into(), email: email.into() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enquiry::NewEnquiry;

  fn enquiry(phone: Option<&str>, email: &str) -> Enquiry {
    let mut e = NewEnquiry {
      full_name: "Ravi".into(),
      email: "placeholder@example.com".into(),
      phone: phone.map(Into::into),
      course_id: Some("istqb-foundation".into()),
      course_interest: None,
      message: "Hello".into(),
    }
    .into_pending();
    e.email = email.into();
    e
  }

  #[test]
  fn whatsapp_link_strips_non_digits() {
    let url = whatsapp_link("+91 98765-43210", "Hi").unwrap();
    assert_eq!(url, "https://wa.me/919876543210?text=Hi");
  }

  #[test]
  fn whatsapp_link_encodes_message() {
    let url = whatsapp_link("(555) 010", "Hi there & welcome?").unwrap();
    assert_eq!(url, "https://wa.me/555010?text=Hi%20there%20%26%20welcome%3F");
  }

  #[test]
  fn whatsapp_link_rejects_phone_without_digits() {
    assert_eq!(whatsapp_link("", "Hi"), Err(ContactError::NoPhoneDigits));
    assert_eq!(whatsapp_link("+ -", "Hi"), Err(ContactError::NoPhoneDigits));
  }

  #[test]
  fn email_link_encodes_subject_and_body() {
    let url = email_link("a@b.co", "Re: course", "Line 1\nLine 2").unwrap();
    assert_eq!(
      url,
      "mailto:a@b.co?subject=Re%3A%20course&body=Line%201%0ALine%202"
    );
  }

  #[test]
  fn email_link_escapes_header_characters_in_address() {
    let url = email_link("a@b.co?cc=evil@x.io&bcc=x #1", "s", "b").unwrap();
    assert_eq!(
      url,
      "mailto:a@b.co%3Fcc%3Devil@x.io%26bcc%3Dx%20%231?subject=s&body=b"
    );
    assert_eq!(url.matches('?').count(), 1);
  }

  #[test]
  fn email_link_rejects_blank_address() {
    assert_eq!(email_link("  ", "s", "b"), Err(ContactError::EmptyEmail));
  }

  #[test]
  fn render_falls_back_to_course_id_then_generic() {
    let mut e = enquiry(None, "x@example.com");
    assert_eq!(
      ContactTemplates::render("{name}: {course}", &e),
      "Ravi: istqb-foundation"
    );
    e.course_interest = Some("API testing".into());
    assert_eq!(ContactTemplates::render("{course}", &e), "API testing");
    e.course_interest = None;
    e.course_id = None;
    assert_eq!(ContactTemplates::render("{course}", &e), "our courses");
  }

  #[test]
  fn contact_links_report_failures_independently() {
    let links = contact_links(&enquiry(None, "ravi@example.com"), &ContactTemplates::default());
    assert!(matches!(links.whatsapp, ContactLink::Unavailable { .. }));
    assert!(links.email.url().unwrap().starts_with("mailto:ravi@example.com?"));

    let json = serde_json::to_value(&links).unwrap();
    assert_eq!(json["whatsapp"]["error"], "phone number contains no digits");
  }

  #[test]
  fn contact_links_are_deterministic() {
    let e = enquiry(Some("98765 43210"), "ravi@example.com");
    let templates = ContactTemplates::default();
    assert_eq!(contact_links(&e, &templates), contact_links(&e, &templates));
  }
}
