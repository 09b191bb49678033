//! Input handling for the TUI application.
//!
//! Key events are mapped to application messages according to the active
//! view and whether a text field currently owns the keyboard.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

use super::app::ActiveView;
use super::messages::AppMsg;
use super::state::FormField;

/// Where keystrokes are currently directed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    /// View receiving input.
    pub view: ActiveView,
    /// Focused form field (only meaningful on the form view).
    pub form_focus: FormField,
    /// Whether the list search box is being edited.
    pub editing_search: bool,
}

impl InputContext {
    /// Returns `true` when printable keys should be typed rather than
    /// interpreted as shortcuts.
    #[must_use]
    pub const fn is_text_entry(&self) -> bool {
        match self.view {
            ActiveView::Form => self.form_focus.is_text(),
            ActiveView::List => self.editing_search,
            ActiveView::Dashboard => false,
        }
    }
}

/// Maps a key event to an application message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message_with_context(key: &KeyMsg, context: InputContext) -> Option<AppMsg> {
    if let Some(global) = map_global_key(key) {
        return Some(global);
    }
    if !context.is_text_entry()
        && let Some(shell) = map_shell_key(key, context)
    {
        return Some(shell);
    }

    match context.view {
        ActiveView::Form => map_form_key(key, context.form_focus),
        ActiveView::List if context.editing_search => map_search_key(key),
        ActiveView::List => map_list_key(key),
        ActiveView::Dashboard => map_dashboard_key(key),
    }
}

/// Keys honoured in every context, including while typing.
fn map_global_key(key: &KeyMsg) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.key == KeyCode::Char('c') {
        return Some(AppMsg::Quit);
    }
    match key.key {
        KeyCode::F(1) => Some(AppMsg::ShowView(ActiveView::Form)),
        KeyCode::F(2) => Some(AppMsg::ShowView(ActiveView::List)),
        KeyCode::F(3) => Some(AppMsg::ShowView(ActiveView::Dashboard)),
        _ => None,
    }
}

/// Shell shortcuts available outside text entry.
///
/// Digits select ratings while the rating control is focused, so view
/// switching by digit is skipped there.
fn map_shell_key(key: &KeyMsg, context: InputContext) -> Option<AppMsg> {
    let rating_focused =
        context.view == ActiveView::Form && context.form_focus == FormField::Rating;
    match key.key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('1') if !rating_focused => Some(AppMsg::ShowView(ActiveView::Form)),
        KeyCode::Char('2') if !rating_focused => Some(AppMsg::ShowView(ActiveView::List)),
        KeyCode::Char('3') if !rating_focused => Some(AppMsg::ShowView(ActiveView::Dashboard)),
        _ => None,
    }
}

fn map_form_key(key: &KeyMsg, focus: FormField) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.key {
            KeyCode::Char('s') => Some(AppMsg::SubmitRequested),
            _ => None,
        };
    }
    match key.key {
        KeyCode::Tab | KeyCode::Down => return Some(AppMsg::FocusNext),
        KeyCode::BackTab | KeyCode::Up => return Some(AppMsg::FocusPrevious),
        KeyCode::Esc => return Some(AppMsg::EscapePressed),
        _ => {}
    }

    match focus {
        FormField::Name | FormField::Email | FormField::Message => map_text_field_key(key),
        FormField::Rating => map_rating_key(key),
        FormField::Submit => match key.key {
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppMsg::SubmitRequested),
            _ => None,
        },
    }
}

const fn map_text_field_key(key: &KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Char(ch) => Some(AppMsg::InsertChar(ch)),
        KeyCode::Backspace => Some(AppMsg::DeleteChar),
        KeyCode::Enter => Some(AppMsg::FocusNext),
        _ => None,
    }
}

fn map_rating_key(key: &KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Left | KeyCode::Char('h') => Some(AppMsg::RatingHoverPrevious),
        KeyCode::Right | KeyCode::Char('l') => Some(AppMsg::RatingHoverNext),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppMsg::RatingCommit),
        KeyCode::Char(digit @ '1'..='5') => digit
            .to_digit(10)
            .and_then(|value| u8::try_from(value).ok())
            .map(AppMsg::RatingSelect),
        _ => None,
    }
}

const fn map_search_key(key: &KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Enter | KeyCode::Esc => Some(AppMsg::FinishSearch),
        KeyCode::Backspace => Some(AppMsg::SearchBackspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppMsg::SearchInput(ch))
        }
        _ => None,
    }
}

const fn map_list_key(key: &KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::PageDown => Some(AppMsg::PageDown),
        KeyCode::PageUp => Some(AppMsg::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('/') => Some(AppMsg::StartSearch),
        KeyCode::Char('s') => Some(AppMsg::CycleSentimentFilter),
        KeyCode::Char('f') => Some(AppMsg::CycleRatingFilter),
        KeyCode::Char('o') => Some(AppMsg::CycleSortKey),
        KeyCode::Char('d') => Some(AppMsg::ToggleSortOrder),
        KeyCode::Char('r') => Some(AppMsg::ListRefreshRequested),
        KeyCode::Esc => Some(AppMsg::EscapePressed),
        _ => None,
    }
}

const fn map_dashboard_key(key: &KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Char('x') => Some(AppMsg::FixSentimentsRequested),
        KeyCode::Char('r') => Some(AppMsg::DashboardRefreshRequested),
        KeyCode::Esc => Some(AppMsg::EscapePressed),
        _ => None,
    }
}
