use std::time::{Duration, Instant};

use ratatui::style::Color;

/// Text that fades in when told to.
///
/// Replacing the text is instant; only `fade_in_at` starts an animation,
/// and there is no fade-out.
#[derive(Debug, Clone)]
pub struct FadingText {
    text: String,
    shown_at: Option<Instant>,
    fade: Duration,
}

impl FadingText {
    pub fn new(fade: Duration) -> Self {
        Self {
            text: String::new(),
            shown_at: None,
            fade,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn fade_in_at(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    /// Opacity in `[0, 1]`: eased progress of the last fade-in, fully
    /// opaque when no fade ever ran or the fade is finished.
    pub fn opacity(&self, now: Instant) -> f32 {
        let Some(shown_at) = self.shown_at else {
            return 1.0;
        };
        if self.fade.is_zero() {
            return 1.0;
        }
        let t = now.saturating_duration_since(shown_at).as_secs_f32() / self.fade.as_secs_f32();
        ease_in_out_quad(t.clamp(0.0, 1.0))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.fade)
    }
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Blend from the terminal's dark background towards `target`.
pub fn faded(target: (u8, u8, u8), opacity: f32) -> Color {
    const FLOOR: f32 = 40.0;
    let mix = |c: u8| {
        let c = f32::from(c);
        (FLOOR + (c - FLOOR) * opacity.clamp(0.0, 1.0)).round() as u8
    };
    Color::Rgb(mix(target.0), mix(target.1), mix(target.2))
}
