//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`interactive`]: Full-screen client with form, list, and dashboard
//! - [`list_feedback`]: Print the filtered feedback list
//! - [`analytics`]: Print the analytics summary
//! - [`fix_sentiments`]: Run the sentiment maintenance action
//!
//! Output formatting utilities are in [`output`].

pub mod analytics;
pub mod fix_sentiments;
pub mod interactive;
pub mod list_feedback;
pub mod output;
