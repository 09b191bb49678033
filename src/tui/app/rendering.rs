//! Rendering logic for the feedback TUI application.
//!
//! These are pure query methods that read state without modification.

use super::{ActiveView, FeedbackApp};
use crate::tui::components::{
    DashboardComponent, DashboardViewContext, FeedbackFormComponent, FeedbackFormViewContext,
    FeedbackListViewContext,
};

const TITLE: &str = "Ulasan - Patient Feedback";

impl FeedbackApp {
    /// Renders the header bar with view tabs and a loading indicator.
    pub(super) fn render_header(&self) -> String {
        let tabs: Vec<String> = ActiveView::ALL
            .iter()
            .map(|view| {
                if *view == self.active_view {
                    format!("[{} {}]", view.shortcut(), view.label())
                } else {
                    format!(" {} {} ", view.shortcut(), view.label())
                }
            })
            .collect();
        let loading_indicator = if self.is_busy() { " [Loading...]" } else { "" };
        format!("{TITLE}  {}{loading_indicator}\n", tabs.join(" "))
    }

    /// Renders the body of the active view.
    pub(super) fn render_active_view(&self) -> String {
        let max_width = self.content_width();
        match self.active_view {
            ActiveView::Form => FeedbackFormComponent::new().view(&FeedbackFormViewContext {
                form: &self.form,
                max_width,
            }),
            ActiveView::List => self.list_component.view(&FeedbackListViewContext {
                state: &self.list,
                visible_height: self.list_component.visible_height(),
                max_width,
            }),
            ActiveView::Dashboard => DashboardComponent::new().view(&DashboardViewContext {
                state: &self.dashboard,
                max_width,
            }),
        }
    }

    /// Renders the status bar with the active view's error or key hints.
    pub(super) fn render_status_bar(&self) -> String {
        let error = match self.active_view {
            ActiveView::Form => None,
            ActiveView::List => self.list.error.as_deref(),
            ActiveView::Dashboard => self.dashboard.error.as_deref(),
        };
        if let Some(message) = error {
            return format!("Error: {message}  (r to retry)\n");
        }
        format!("{}\n", self.status_hints())
    }

    const fn status_hints(&self) -> &'static str {
        let wide = self.width > 80;
        match (self.active_view, wide) {
            (ActiveView::Form, false) => "Tab:next  Ctrl+S:submit  F2/F3:views  Ctrl+C:quit",
            (ActiveView::Form, true) => {
                "Tab:next  Left/Right:preview  Enter:select  Ctrl+S:submit  Esc:dismiss  F1-F3:views  Ctrl+C:quit"
            }
            (ActiveView::List, false) => "j/k:move  /:search  s/f:filter  o/d:sort  ?:help  q:quit",
            (ActiveView::List, true) => {
                "j/k:move  /:search  s:sentiment  f:rating  o:sort  d:direction  r:refresh  ?:help  q:quit"
            }
            (ActiveView::Dashboard, false) => "x:fix sentiments  r:refresh  ?:help  q:quit",
            (ActiveView::Dashboard, true) => {
                "x:fix sentiments  r:refresh  Esc:dismiss  1-3:views  ?:help  q:quit"
            }
        }
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Views:
  F1, 1      Submit feedback
  F2, 2      Feedback list
  F3, 3      Analytics dashboard
  ?          Toggle this help
  q          Quit (outside text fields)
  Ctrl+C     Quit

Submit form:
  Tab, Down  Next field
  Shift+Tab  Previous field
  Left/Right Preview rating
  Enter      Select previewed rating
  1-5        Select rating directly
  Ctrl+S     Submit
  Esc        Dismiss banner

Feedback list:
  j, Down    Move cursor down
  k, Up      Move cursor up
  PgDn/PgUp  Page down/up
  Home/End   First/last record
  /          Edit search (Enter/Esc to finish)
  s          Cycle sentiment filter
  f          Cycle rating filter
  o          Cycle sort key
  d          Toggle sort direction
  r          Refresh now
  Esc        Clear search

Dashboard:
  x          Fix sentiments
  r          Refresh now
  Esc        Dismiss result

Press any key to close this help.
";
        help_text.to_owned()
    }
}
