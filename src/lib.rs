//! Rental listing service: a property catalog with filtering, slug lookup,
//! room-tagged galleries and a rotating featured carousel, plus contact and
//! newsletter intake.
//!
//! # Layout
//! - [`catalog`] holds the live snapshot ([`catalog::CatalogStore`]), the
//!   pure queries over it and the shared [`catalog::RotationCursor`].
//! - [`submissions`] validates form input and hands records to a
//!   [`submissions::SubmissionSink`].
//! - [`access`] turns session credentials into an [`access::Identity`].
//! - [`server`] wires all of it into an axum router.
//!
//! # Notes
//! The carousel position is one counter for the whole process. Two visitors
//! clicking "next" at the same time each advance it, so each sees the other's
//! step. That is kept on purpose; a per-session cursor would need a session
//! key and a map in place of the single counter.

pub mod access;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod submissions;

pub use config::Config;
pub use error::{AppError, CatalogError, StorageError, SubmissionError};
