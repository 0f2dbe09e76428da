//! # Clinote Architecture
//!
//! Clinote lets you edit notes kept by a cloud note service in your own text
//! editor. A note is fetched, written to a local document, handed to the
//! editor, read back and, if anything changed, saved to the note store.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, fills in config defaults      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Lookups, edit sessions, saving with recovery points      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators                                              │
//! │  - NoteStoreClient (remote), Storager (local state)         │
//! │  - Editor, ContentConverter, CacheDir                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote transport is not part of this crate: implement
//! [`store::NoteStoreClient`] for it and build a [`client::Client`].
//!
//! ## The Editable Document
//!
//! ```text
//! ---
//! title: Groceries
//! notebook: Home
//! ---
//! milk
//! eggs
//! ```
//!
//! The content is the markdown rendering of the note, or its wire markup in
//! raw mode. See [`header`] and [`document`].
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; installing a subscriber is up to the
//! program embedding the library.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`store`]: Store traits, file and in-memory implementations
//! - [`model`]: `Note`, `Notebook`, `EditMode`, `NoteFilter`
//! - [`header`], [`document`]: The editable document format
//! - [`fingerprint`]: Change detection
//! - [`enml`]: The wire document envelope
//! - [`convert`]: Markdown and wire markup conversion
//! - [`notebook`]: Notebook lookups
//! - [`cache`]: Cache documents
//! - [`editor`]: External editor integration
//! - [`listing`]: Note table rendering
//! - [`config`]: Configuration and directories
//! - [`error`]: Error types

pub mod api;
pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod convert;
pub mod document;
pub mod editor;
pub mod enml;
pub mod error;
pub mod fingerprint;
pub mod header;
pub mod listing;
pub mod model;
pub mod notebook;
pub mod store;
