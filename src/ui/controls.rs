use std::time::{Duration, Instant};

use ratatui::style::{Color, Modifier, Style};

/// How long a button keeps its pressed look after a key press.
pub const PRESS_FLASH: Duration = Duration::from_millis(150);

/// Buttons of the control bar, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    Previous,
    PlayPause,
    Next,
    Shuffle,
    VolumeDown,
    VolumeUp,
    Playlist,
    Overlay,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Previous,
        Control::PlayPause,
        Control::Next,
        Control::Shuffle,
        Control::VolumeDown,
        Control::VolumeUp,
        Control::Playlist,
        Control::Overlay,
    ];

    pub fn key_hint(self) -> &'static str {
        match self {
            Control::Previous => "h",
            Control::PlayPause => "space",
            Control::Next => "l",
            Control::Shuffle => "s",
            Control::VolumeDown => "-",
            Control::VolumeUp => "+",
            Control::Playlist => "p",
            Control::Overlay => "o",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::Previous => "prev",
            Control::PlayPause => "play",
            Control::Next => "next",
            Control::Shuffle => "shuffle",
            Control::VolumeDown => "vol-",
            Control::VolumeUp => "vol+",
            Control::Playlist => "list",
            Control::Overlay => "lyric",
        }
    }

    /// The look of this button in its three states.
    pub fn visual(self) -> HoverPressVisual<Style> {
        let accent = match self {
            Control::PlayPause => Color::Green,
            Control::Shuffle => Color::Magenta,
            Control::Playlist | Control::Overlay => Color::Cyan,
            _ => Color::Gray,
        };
        HoverPressVisual {
            normal: Style::default().fg(Color::DarkGray),
            hover: Style::default().fg(accent),
            pressed: Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hover,
    Pressed,
}

impl ButtonState {
    /// Pressed wins over hover; `active` is the button's toggle state.
    pub fn resolve(pressed_at: Option<Instant>, active: bool, now: Instant) -> Self {
        match pressed_at {
            Some(at) if now.saturating_duration_since(at) < PRESS_FLASH => ButtonState::Pressed,
            _ if active => ButtonState::Hover,
            _ => ButtonState::Normal,
        }
    }
}

/// One value per button state, chosen by `ButtonState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPressVisual<T> {
    pub normal: T,
    pub hover: T,
    pub pressed: T,
}

impl<T> HoverPressVisual<T> {
    pub fn get(&self, state: ButtonState) -> &T {
        match state {
            ButtonState::Normal => &self.normal,
            ButtonState::Hover => &self.hover,
            ButtonState::Pressed => &self.pressed,
        }
    }
}
