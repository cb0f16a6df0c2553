//! # Sekai Architecture
//!
//! Sekai is a **UI-agnostic manga collection library**. The command-line client
//! in `crates/sekai` is one consumer of it; a GUI or a web service could drive the
//! same forms and view models without touching the layers below.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (crates/sekai, or any other client)           │
//! │  - Renders ListState / DetailResult / FormDraft             │
//! │  - Shows Message notifications                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Models (views.rs, form.rs, validation.rs)             │
//! │  - List/detail state, form phases, field errors             │
//! │  - Report outcomes as values, never panic on storage errors │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                 │
//! │  - Domain `Manga` with string ids                           │
//! │  - Observable feed of the ordered collection                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore over a StorageBackend                        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout/stderr or exits the process. Failures
//! travel as [`error::SekaiError`] inside the storage layer and as
//! [`messages::Message`] values once they reach a view model. Diagnostics go
//! through `tracing`; installing a subscriber is the client's job.
//!
//! ## One Repository Per Process
//!
//! [`init::initialize`] opens the collection once and hands back an
//! `Arc<DurableRepository>`. Every form and view model receives that handle
//! explicitly, so tests can pass a `VolatileRepository` instead.
//!
//! ## Testing Strategy
//!
//! - **Store**: `InMemoryStore` plus `MemBackend::set_simulate_write_error` for
//!   failure paths; `tests/fs_backend_test.rs` for the on-disk format.
//! - **Forms and views**: driven against `VolatileRepository` seeded with
//!   `StoreFixture`.
//! - **End to end**: `tests/collection_flow.rs` over a temporary directory via
//!   [`test_utils::TestEnv`].

pub mod config;
pub mod error;
pub mod form;
pub mod init;
pub mod messages;
pub mod model;
pub mod repository;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
