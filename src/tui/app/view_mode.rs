//! Active view selection and shared layout constants.

/// Rows reserved for the header and status bar.
pub(crate) const CHROME_HEIGHT: usize = 2;
/// Minimum rows for the record window, so at least one record stays visible
/// on very small terminals.
pub(crate) const MIN_LIST_HEIGHT: usize = 1;

/// Which top-level view the user is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveView {
    /// Feedback submission form.
    #[default]
    Form,
    /// Searchable feedback list.
    List,
    /// Analytics dashboard.
    Dashboard,
}

impl ActiveView {
    /// Every view in tab order.
    pub const ALL: [Self; 3] = [Self::Form, Self::List, Self::Dashboard];

    /// Tab label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Form => "Submit",
            Self::List => "Feedback",
            Self::Dashboard => "Dashboard",
        }
    }

    /// Shortcut digit that selects this view.
    #[must_use]
    pub const fn shortcut(self) -> char {
        match self {
            Self::Form => '1',
            Self::List => '2',
            Self::Dashboard => '3',
        }
    }
}
