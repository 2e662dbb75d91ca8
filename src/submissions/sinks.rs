use crate::error::StorageError;
use crate::models::{ContactSubmission, NewsletterSubscriber};
use crate::submissions::traits::SubmissionSink;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Accepts submissions and drops them after logging
#[derive(Debug, Default)]
pub struct DiscardSink {
    next_id: AtomicI64,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionSink for DiscardSink {
    async fn append_contact(&self, record: ContactSubmission) -> Result<i64, StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            id,
            inquiry = record.inquiry_type.map(|t| t.as_str()).unwrap_or("general"),
            property_id = record.property_id,
            "Contact submission received (not stored)"
        );
        Ok(id)
    }

    async fn append_subscriber(&self, record: NewsletterSubscriber) -> Result<i64, StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        info!(id, has_name = record.first_name.is_some(), "Newsletter signup received (not stored)");
        Ok(id)
    }

    fn sink_name(&self) -> &'static str {
        "discard"
    }
}

/// Keeps submissions in process memory
#[derive(Debug, Default)]
pub struct MemorySink {
    contacts: Mutex<Vec<ContactSubmission>>,
    subscribers: Mutex<Vec<NewsletterSubscriber>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contacts(&self) -> Vec<ContactSubmission> {
        self.contacts.lock().await.clone()
    }

    pub async fn subscribers(&self) -> Vec<NewsletterSubscriber> {
        self.subscribers.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn append_contact(&self, mut record: ContactSubmission) -> Result<i64, StorageError> {
        let mut contacts = self.contacts.lock().await;
        record.id = contacts.len() as i64 + 1;
        let id = record.id;
        contacts.push(record);
        Ok(id)
    }

    async fn append_subscriber(&self, mut record: NewsletterSubscriber) -> Result<i64, StorageError> {
        let mut subscribers = self.subscribers.lock().await;
        record.id = subscribers.len() as i64 + 1;
        let id = record.id;
        subscribers.push(record);
        Ok(id)
    }

    fn sink_name(&self) -> &'static str {
        "memory"
    }
}

/// One line of a JSON-lines submission log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoredSubmission {
    Contact(ContactSubmission),
    Newsletter(NewsletterSubscriber),
}

impl StoredSubmission {
    pub fn id(&self) -> i64 {
        match self {
            StoredSubmission::Contact(c) => c.id,
            StoredSubmission::Newsletter(n) => n.id,
        }
    }
}

/// Appends every submission as a JSON line to a single file.
///
/// The id counter lives behind the write lock and only moves once a line
/// has been written, so ids in the log are unique and in file order.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    last_id: Mutex<i64>,
}

impl JsonLinesSink {
    /// Open (or create) the log, continuing after the highest stored id
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let last_id = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => highest_id(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(StorageError(format!("{}: {e}", path.display()))),
        };

        Ok(Self {
            path,
            last_id: Mutex::new(last_id),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, entry: impl FnOnce(i64) -> StoredSubmission) -> Result<i64, StorageError> {
        let mut last_id = self.last_id.lock().await;
        let id = *last_id + 1;

        let mut line = serde_json::to_string(&entry(id)).map_err(|e| StorageError(e.to_string()))?;
        line.push('\n');
        self.write_line(&line).await?;

        *last_id = id;
        Ok(id)
    }

    async fn write_line(&self, line: &str) -> Result<(), StorageError> {
        let io_error = |e: std::io::Error| StorageError(format!("{}: {e}", self.path.display()));

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).await.map_err(io_error)?;
        file.flush().await.map_err(io_error)
    }
}

fn highest_id(raw: &str) -> i64 {
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| match serde_json::from_str::<StoredSubmission>(l) {
            Ok(entry) => Some(entry.id()),
            Err(e) => {
                warn!("Skipping unreadable submission log line: {e}");
                None
            }
        })
        .max()
        .unwrap_or(0)
}

#[async_trait]
impl SubmissionSink for JsonLinesSink {
    async fn append_contact(&self, record: ContactSubmission) -> Result<i64, StorageError> {
        self.append(move |id| StoredSubmission::Contact(ContactSubmission { id, ..record }))
            .await
    }

    async fn append_subscriber(&self, record: NewsletterSubscriber) -> Result<i64, StorageError> {
        self.append(move |id| StoredSubmission::Newsletter(NewsletterSubscriber { id, ..record }))
            .await
    }

    fn sink_name(&self) -> &'static str {
        "jsonl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contact(name: &str) -> ContactSubmission {
        ContactSubmission {
            id: 0,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "555-0101".to_string(),
            property_id: Some(2),
            inquiry_type: None,
            preferred_date: None,
            preferred_time: None,
            message: "Hello".to_string(),
            created_at: Utc::now(),
        }
    }

    fn subscriber(email: &str) -> NewsletterSubscriber {
        NewsletterSubscriber {
            id: 0,
            email: email.to_string(),
            first_name: None,
            subscribed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn memory_sink_assigns_sequential_ids() {
        let sink = MemorySink::new();
        assert_eq!(sink.append_contact(contact("a")).await.unwrap(), 1);
        assert_eq!(sink.append_contact(contact("b")).await.unwrap(), 2);
        assert_eq!(sink.append_subscriber(subscriber("c@example.com")).await.unwrap(), 1);

        let contacts = sink.contacts().await;
        assert_eq!(contacts[1].name, "b");
        assert_eq!(contacts[1].id, 2);
        assert_eq!(sink.subscribers().await.len(), 1);
    }

    #[tokio::test]
    async fn discard_sink_still_hands_out_ids() {
        let sink = DiscardSink::new();
        assert_eq!(sink.append_contact(contact("a")).await.unwrap(), 1);
        assert_eq!(sink.append_subscriber(subscriber("b@example.com")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn jsonl_sink_appends_tagged_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");

        let sink = JsonLinesSink::open(&path).await.unwrap();
        sink.append_contact(contact("a")).await.unwrap();
        sink.append_subscriber(subscriber("b@example.com")).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let entries: Vec<StoredSubmission> = raw
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], StoredSubmission::Contact(c) if c.id == 1 && c.name == "a"));
        assert!(matches!(&entries[1], StoredSubmission::Newsletter(n) if n.id == 2));
        assert!(raw.lines().next().unwrap().contains("\"kind\":\"contact\""));
    }

    #[tokio::test]
    async fn jsonl_sink_continues_ids_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");

        let sink = JsonLinesSink::open(&path).await.unwrap();
        sink.append_contact(contact("a")).await.unwrap();
        sink.append_contact(contact("b")).await.unwrap();
        drop(sink);

        let reopened = JsonLinesSink::open(&path).await.unwrap();
        assert_eq!(reopened.append_subscriber(subscriber("c@example.com")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn jsonl_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can neither be read as a log nor appended to
        let failed = match JsonLinesSink::open(dir.path()).await {
            Ok(sink) => sink.append_contact(contact("a")).await.is_err(),
            Err(_) => true,
        };
        assert!(failed);
    }

    #[tokio::test]
    async fn jsonl_sink_failed_write_does_not_use_up_an_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");
        let sink = JsonLinesSink::open(&path).await.unwrap();

        // A directory in place of the log makes the append fail
        tokio::fs::create_dir(&path).await.unwrap();
        assert!(sink.append_contact(contact("a")).await.is_err());
        tokio::fs::remove_dir(&path).await.unwrap();

        assert_eq!(sink.append_contact(contact("b")).await.unwrap(), 1);
        drop(sink);

        let reopened = JsonLinesSink::open(&path).await.unwrap();
        assert_eq!(reopened.append_contact(contact("c")).await.unwrap(), 2);

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let ids: Vec<i64> = raw
            .lines()
            .map(|l| serde_json::from_str::<StoredSubmission>(l).unwrap().id())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn jsonl_sink_resumes_from_highest_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");

        let mut stored = contact("a");
        stored.id = 7;
        let line = serde_json::to_string(&StoredSubmission::Contact(stored)).unwrap();
        tokio::fs::write(&path, format!("{line}\nnot json\n")).await.unwrap();

        let sink = JsonLinesSink::open(&path).await.unwrap();
        assert_eq!(sink.append_subscriber(subscriber("b@example.com")).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn jsonl_sink_concurrent_appends_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let sink = std::sync::Arc::new(
            JsonLinesSink::open(dir.path().join("submissions.jsonl")).await.unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = sink.clone();
                tokio::spawn(async move { sink.append_contact(contact(&format!("c{i}"))).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());

        let raw = tokio::fs::read_to_string(sink.path()).await.unwrap();
        let in_file: Vec<i64> = raw
            .lines()
            .map(|l| serde_json::from_str::<StoredSubmission>(l).unwrap().id())
            .collect();
        assert_eq!(in_file, ids);
    }
}
