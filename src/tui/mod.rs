//! Terminal User Interface for submitting and reviewing patient feedback.
//!
//! This module provides an interactive TUI with three views, built on the
//! bubbletea-rs framework: a submission form, a searchable feedback list,
//! and an analytics dashboard.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::FeedbackApp`]
//! - **View**: Rendering logic in each component's `view()` method
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`state`]: Per-view state and derived display data
//! - [`components`]: Rendering components, including the star rating control
//! - [`input`]: Key-to-message mapping for input handling
//! - [`refresh`]: Poll timers, the shared refresh signal, and request
//!   stamping
//!
//! # Startup Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the gateway and initial settings live in module-level storage.
//! Call [`set_gateway`] (and optionally [`set_initial_list_settings`],
//! [`set_initial_terminal_size`], and [`set_telemetry_sink`]) before
//! starting the program; `FeedbackApp::init()` reads them back.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod refresh;
pub mod state;
mod storage;

pub use app::{ActiveView, FeedbackApp};
pub use storage::{
    ListSettings, set_gateway, set_initial_list_settings, set_initial_terminal_size,
    set_telemetry_sink,
};
