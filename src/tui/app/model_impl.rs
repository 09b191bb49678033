//! `Model` trait implementation for the feedback TUI application.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `FeedbackApp`, handling initialisation, update dispatch, and frame
//! layout.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::{CHROME_HEIGHT, FeedbackApp};
use crate::tui::input::{InputContext, map_key_to_message_with_context};
use crate::tui::messages::AppMsg;
use crate::tui::storage;

impl Model for FeedbackApp {
    fn init() -> (Self, Option<Cmd>) {
        let (width, height) = storage::get_initial_terminal_size();
        let model = Self::new(storage::get_gateway())
            .with_telemetry(storage::get_telemetry_sink())
            .with_list_settings(storage::get_initial_list_settings())
            .with_size(width, height);

        // Fetches and poll timers start when `AppMsg::Initialized` arrives.
        (model, Some(Self::immediate_init_cmd()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let mapped = map_key_to_message_with_context(key_msg, self.input_context())?;
            return self.handle_message(&mapped);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }

        let body_height = usize::from(self.height).saturating_sub(CHROME_HEIGHT);
        let body = self.render_active_view();

        let mut output = self.render_header();
        let mut rows = 0_usize;
        for line in body.lines().take(body_height) {
            output.push_str(line);
            output.push('\n');
            rows = rows.saturating_add(1);
        }
        // Keep the status bar pinned to the last row.
        for _ in rows..body_height {
            output.push('\n');
        }
        output.push_str(&self.render_status_bar());

        self.normalise_viewport(&output)
    }
}

impl FeedbackApp {
    /// Returns the current input context for context-aware key mapping.
    pub(crate) const fn input_context(&self) -> InputContext {
        InputContext {
            view: self.active_view,
            form_focus: self.form.focus,
            editing_search: self.list.editing_search,
        }
    }

    /// Columns available to view content, one less than the terminal width
    /// to avoid autowrap.
    pub(super) fn content_width(&self) -> usize {
        usize::from(self.width).saturating_sub(1).max(1)
    }

    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are padded with spaces so shorter rows overwrite stale cells from
    /// the previous frame, and clamped to one column less than the terminal
    /// width.
    fn normalise_viewport(&self, output: &str) -> String {
        let safe_width = self.content_width();
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| pad_or_truncate_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

fn pad_or_truncate_line(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible_width = 0_usize;

    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible_width.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible_width = visible_width.saturating_add(char_width);
    }

    output.push_str(&" ".repeat(width.saturating_sub(visible_width)));
    output
}
