//! # Diary Architecture
//!
//! Diary is a **UI-agnostic journaling library** with an interactive terminal
//! client on top. Authors write diary entries; both live in a SQLite database.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Screens built from navkit menus, pagers and actions      │
//! │  - The ONLY place that reads stdin or writes to stdout      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the services, owns the store            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (services/*.rs)                              │
//! │  - Business rules: unique emails, guarded author deletion,  │
//! │    search and date filters, statistics                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait                                          │
//! │  - SqliteStore: transactional writes, parameterized reads   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result`s. It never
//! prints and never exits the process. Lookups that find nothing return
//! `Option::None`; only rule violations and storage failures are errors.
//!
//! ## Entities Validate Themselves
//!
//! [`model::Author`] and [`model::DiaryEntry`] can only be built or modified
//! through constructors and setters that trim and check their input, so a
//! value that exists is a value that may be saved.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`services`]: Business logic for authors, entries and statistics
//! - [`store`]: Storage abstraction and the SQLite implementation
//! - [`model`]: `Author`, `DiaryEntry` and their ids
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and the interactive screens (binary only)

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod store;
