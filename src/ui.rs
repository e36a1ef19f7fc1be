//! Terminal display of the player.
//!
//! `ViewState` is the display collaborator the coordinator talks to; it
//! only records what should be shown. `draw` renders that state with
//! `ratatui`: the main player panel, the playlist panel, the floating
//! lyric overlay and the control bar.

mod controls;
mod draw;
mod fade;
mod view;

pub use controls::{ButtonState, Control, HoverPressVisual};
pub use draw::draw;
pub use view::ViewState;
