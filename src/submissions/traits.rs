use crate::error::StorageError;
use crate::models::{ContactSubmission, NewsletterSubscriber};
use async_trait::async_trait;

/// Where validated submissions go. Each append returns the stored id.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn append_contact(&self, record: ContactSubmission) -> Result<i64, StorageError>;

    async fn append_subscriber(&self, record: NewsletterSubscriber) -> Result<i64, StorageError>;

    /// Get the name of the sink
    fn sink_name(&self) -> &'static str;
}
