pub mod sinks;
pub mod traits;
pub mod validate;

pub use sinks::{DiscardSink, JsonLinesSink, MemorySink, StoredSubmission};
pub use traits::SubmissionSink;
pub use validate::{validate_contact, validate_newsletter, ContactForm, NewsletterForm};
