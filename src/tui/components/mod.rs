//! UI components for the feedback TUI.
//!
//! Each component renders one view from a borrowed view context and keeps
//! only rendering concerns of its own.

mod dashboard;
mod feedback_form;
mod feedback_list;
mod star_rating;
pub(crate) mod text_truncate;

pub use dashboard::{DashboardComponent, DashboardViewContext};
pub use feedback_form::{FeedbackFormComponent, FeedbackFormViewContext};
pub use feedback_list::{
    DETAIL_HEIGHT, FeedbackListComponent, FeedbackListViewContext, LIST_CHROME_HEIGHT,
};
pub use star_rating::{DEFAULT_MAX_STARS, StarRating, render_stars};
