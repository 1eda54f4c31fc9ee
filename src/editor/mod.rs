//! Editing surface for the editor window.
//!
//! Provides a rope-backed text buffer with cursor management and undo
//! history, and the surface that toggles it between raw editing and a
//! read-only markdown rendering.

mod buffer;
mod surface;

pub use buffer::{Cursor, Direction, EditorBuffer, HISTORY_LIMIT};
pub use surface::{DisplayMode, TextSurface};
