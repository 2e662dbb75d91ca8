use crate::catalog::query::find_by_slug;
use crate::error::SubmissionError;
use crate::models::{ContactSubmission, NewsletterSubscriber, Property};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

pub const CONTACT_REQUIRED_MESSAGE: &str = "Please fill in all required fields";
pub const NEWSLETTER_REQUIRED_MESSAGE: &str = "Please enter your email address";

/// Contact form fields as posted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Slug of the property the inquiry is about
    pub property: String,
    pub inquiry_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterForm {
    pub email: String,
    pub first_name: String,
}

/// Check required contact fields and build the record.
///
/// Fields are compared against the exact empty string, so whitespace-only
/// values pass. The property slug is a weak reference: unknown slugs are
/// dropped rather than rejected, as are unknown inquiry types and dates.
pub fn validate_contact(
    form: &ContactForm,
    catalog: &[Property],
) -> Result<ContactSubmission, SubmissionError> {
    if form.name.is_empty() || form.email.is_empty() || form.phone.is_empty() || form.message.is_empty() {
        return Err(SubmissionError::Validation(CONTACT_REQUIRED_MESSAGE));
    }

    let property_id = Some(form.property.as_str())
        .filter(|s| !s.is_empty())
        .and_then(|slug| find_by_slug(catalog, slug).ok())
        .map(|p| p.id);

    Ok(ContactSubmission {
        id: 0,
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        property_id,
        inquiry_type: form.inquiry_type.parse().ok(),
        preferred_date: NaiveDate::parse_from_str(&form.preferred_date, "%Y-%m-%d").ok(),
        preferred_time: non_empty(&form.preferred_time),
        message: form.message.clone(),
        created_at: Utc::now(),
    })
}

pub fn validate_newsletter(form: &NewsletterForm) -> Result<NewsletterSubscriber, SubmissionError> {
    if form.email.is_empty() {
        return Err(SubmissionError::Validation(NEWSLETTER_REQUIRED_MESSAGE));
    }

    Ok(NewsletterSubscriber {
        id: 0,
        email: form.email.clone(),
        first_name: non_empty(&form.first_name),
        subscribed_at: Utc::now(),
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
