//! # Render Module
//!
//! Turns store state into what the user sees.
//!
//! ## Components
//! - `projection`: pure functions from records to view models
//! - `escape`: neutralizes user text for a given output medium
//! - `terminal`: paints view models on a terminal
//! - `html`: paints view models as markup fragments

pub mod escape;
pub mod html;
pub mod projection;
pub mod terminal;

use chrono::{DateTime, Local, Utc};

pub use projection::{SidebarView, TranscriptView};

/// Placeholder shown in the transcript while an answer is pending.
pub const PENDING_TEXT: &str = "Thinking...";

/// Adapter that paints view models onto a concrete UI.
///
/// All text arriving here is raw user or answer text; implementations escape
/// it for their medium before painting.
pub trait ChatView: Send + 'static {
    /// Shows the submitted question and a pending indicator.
    fn show_pending(&mut self, question: &str);
    /// Removes the pending indicator.
    fn clear_pending(&mut self);
    /// Shows an inline error bubble.
    fn show_error(&mut self, message: &str);
    fn render_transcript(&mut self, view: &TranscriptView);
    fn render_sidebar(&mut self, view: &SidebarView);
    /// Replaces the contents of the input field.
    fn set_input(&mut self, text: &str);
    /// Shows a transient user-visible notice.
    fn notify(&mut self, message: &str);
}

pub(crate) fn time_of_day(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub(crate) fn date_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
