//! Star rating control.
//!
//! Renders `max` positions as filled or empty stars. In interactive mode a
//! hovered position is previewed without committing; selecting a position
//! hands the value to the caller's commit callback. The committed value is
//! owned by the caller and pushed back with [`StarRating::set_value`].

/// Default number of positions.
pub const DEFAULT_MAX_STARS: u8 = 5;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Display and input state for a star rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRating {
    max: u8,
    value: u8,
    read_only: bool,
    hover: Option<u8>,
}

impl Default for StarRating {
    fn default() -> Self {
        Self::interactive(DEFAULT_MAX_STARS, DEFAULT_MAX_STARS)
    }
}

impl StarRating {
    /// Creates an interactive control bound to `value`.
    #[must_use]
    pub const fn interactive(value: u8, max: u8) -> Self {
        Self {
            max,
            value,
            read_only: false,
            hover: None,
        }
    }

    /// Creates a read-only control showing `value`.
    #[must_use]
    pub const fn read_only(value: u8, max: u8) -> Self {
        Self {
            max,
            value,
            read_only: true,
            hover: None,
        }
    }

    /// Returns the number of positions.
    #[must_use]
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Returns the bound (committed) value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Returns the hovered position, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<u8> {
        self.hover
    }

    /// Returns the value currently displayed: the hover preview if present,
    /// otherwise the bound value.
    #[must_use]
    pub const fn effective_value(&self) -> u8 {
        match self.hover {
            Some(hovered) => hovered,
            None => self.value,
        }
    }

    /// Updates the bound value.
    pub const fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Previews `position` without committing it.
    ///
    /// Ignored in read-only mode and for positions outside `1..=max`.
    pub const fn hover(&mut self, position: u8) {
        if !self.read_only && self.is_position(position) {
            self.hover = Some(position);
        }
    }

    /// Clears the hover preview.
    pub const fn leave(&mut self) {
        self.hover = None;
    }

    /// Moves the hover preview one position up or down from the displayed
    /// value, staying within `1..=max`.
    pub fn step_hover(&mut self, forward: bool) {
        let current = self.effective_value();
        let target = if forward {
            current.saturating_add(1).min(self.max)
        } else {
            current.saturating_sub(1).max(1)
        };
        self.hover(target);
    }

    /// Selects `position`, invoking `on_change` with it exactly once.
    ///
    /// Returns `false` without calling `on_change` in read-only mode or for
    /// positions outside `1..=max`.
    pub fn select<F>(&self, position: u8, on_change: F) -> bool
    where
        F: FnOnce(u8),
    {
        if self.read_only || !self.is_position(position) {
            return false;
        }
        on_change(position);
        true
    }

    const fn is_position(&self, position: u8) -> bool {
        position >= 1 && position <= self.max
    }

    /// Renders the stars as a string, filled up to the displayed value.
    #[must_use]
    pub fn view(&self) -> String {
        let filled = self.effective_value().min(self.max);
        (1..=self.max)
            .map(|position| {
                if position <= filled {
                    FILLED_STAR
                } else {
                    EMPTY_STAR
                }
            })
            .collect()
    }
}

/// Renders a read-only rating with `max` positions.
#[must_use]
pub fn render_stars(value: u8, max: u8) -> String {
    StarRating::read_only(value, max).view()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{StarRating, render_stars};

    #[test]
    fn hover_previews_without_committing() {
        let mut stars = StarRating::interactive(2, 5);
        let mut commits = Vec::new();

        stars.hover(4);

        assert_eq!(stars.effective_value(), 4);
        assert_eq!(stars.view(), "★★★★☆");
        assert_eq!(stars.value(), 2);
        assert!(commits.is_empty());

        stars.leave();
        assert_eq!(stars.effective_value(), 2);
        assert_eq!(stars.view(), "★★☆☆☆");

        assert!(stars.select(3, |value| commits.push(value)));
        assert_eq!(commits, vec![3]);
    }

    #[test]
    fn read_only_ignores_hover_and_selection() {
        let mut stars = StarRating::read_only(3, 5);
        let mut commits: Vec<u8> = Vec::new();

        stars.hover(5);
        let selected = stars.select(5, |value| commits.push(value));

        assert!(!selected);
        assert!(commits.is_empty());
        assert_eq!(stars.view(), "★★★☆☆");
    }

    #[rstest]
    #[case::zero(0)]
    #[case::above_max(6)]
    fn out_of_range_positions_are_ignored(#[case] position: u8) {
        let mut stars = StarRating::interactive(3, 5);
        let mut commits: Vec<u8> = Vec::new();

        stars.hover(position);
        let selected = stars.select(position, |value| commits.push(value));

        assert_eq!(stars.hovered(), None);
        assert!(!selected);
        assert!(commits.is_empty());
    }

    #[rstest]
    #[case::up_from_three(3, true, 4)]
    #[case::up_at_max(5, true, 5)]
    #[case::down_from_three(3, false, 2)]
    #[case::down_at_min(1, false, 1)]
    fn step_hover_stays_in_range(#[case] value: u8, #[case] forward: bool, #[case] expected: u8) {
        let mut stars = StarRating::interactive(value, 5);

        stars.step_hover(forward);

        assert_eq!(stars.hovered(), Some(expected));
    }

    #[test]
    fn render_stars_honours_max() {
        assert_eq!(render_stars(2, 3), "★★☆");
        assert_eq!(render_stars(9, 3), "★★★");
    }
}
