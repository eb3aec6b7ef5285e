//! study-organizer - study task tracker library
//!
//! An in-memory task collection served over a small REST API, a view model
//! that derives the dashboard from it, and an HTML rendering of that view.
//!
//! # Core Concepts
//!
//! - **Task**: title, optional description and due date, completion flag
//! - **Store**: the owned, mutex-guarded collection; ids are never reused
//! - **View**: filter, search and sort over a snapshot, plus stats, timeline
//!   and chart aggregates relative to today
//! - **Session**: a client's cached snapshot, reloaded after each mutation
//!
//! # Module Organization
//!
//! - `api`: axum router, handlers and HTTP error bodies
//! - `cli`: Command-line interface using clap
//! - `client`: reqwest client and the cached client session
//! - `config`: Configuration loading from `study-organizer.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON command output
//! - `server`: Layers, bind and graceful shutdown
//! - `store`: In-memory task store
//! - `task`: Task records, payloads and ordering
//! - `ui`: View model, edit session, charts and HTML rendering

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod server;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
