//! Progress tracking
//!
//! The persisted [`ProgressDocument`], the [`Mutation`]s that change it, the
//! backends that store it and the [`ProgressStore`] that ties them together.

pub mod backend;
pub mod document;
pub mod mutation;
pub mod store;
pub mod transfer;

pub use backend::{JsonFileBackend, MemoryBackend, PROGRESS_FILE, ProgressBackend};
pub use document::ProgressDocument;
pub use mutation::{Mutation, reduce};
pub use store::{ListenerId, LoadPolicy, ProgressStore};
pub use transfer::{export_progress, import_progress};
