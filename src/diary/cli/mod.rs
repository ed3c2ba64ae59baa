//! # CLI Layer
//!
//! This module is **one possible UI client** for the diary library. It is the
//! only place that reads stdin, writes stdout, or decides exit codes.
//!
//! ## Structure
//!
//! - `setup`: clap argument definitions
//! - `commands`: `run()` (called by `main.rs`), context setup, logging, and the
//!   one-shot `stats`/`path` commands
//! - `app`: the [`app::App`] context every screen receives
//! - `screens`: the interactive screens, each a navkit `Action`
//! - `render`: text formatting for rows, detail views and statistics
//!
//! ## Navigation Model
//!
//! Screens never call each other. Each returns the next screen to the router;
//! a screen that can go "back" is handed its back destination when built.
//! Detail views (entry and author actions) are navkit `Menu`s that run inside a
//! single screen and return to that screen's back destination when left.

mod app;
mod commands;
mod render;
mod screens;
mod setup;

pub use commands::run;
