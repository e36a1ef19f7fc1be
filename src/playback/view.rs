use crate::playlist::Track;

/// Everything the coordinator shows to the user.
///
/// The label and the floating overlay each get their own fade-in trigger.
/// Setting text never animates by itself; a fade is only started when the
/// matching `fade_in_*` call follows.
pub trait PlayerView {
    fn set_status_text(&mut self, text: &str);

    fn set_lyric(&mut self, text: &str);
    fn fade_in_lyric(&mut self);
    fn set_overlay_lyric(&mut self, text: &str);
    fn fade_in_overlay(&mut self);

    fn set_progress_range(&mut self, duration_ms: u64);
    fn set_progress_position(&mut self, position_ms: u64);
    fn set_elapsed_text(&mut self, text: &str);

    fn set_shuffle(&mut self, shuffle: bool, label: &str);
    fn set_playing(&mut self, playing: bool);
    fn set_volume(&mut self, volume: u8);

    fn set_playlist(&mut self, tracks: &[Track]);
    fn set_current_track(&mut self, index: Option<usize>);
}

/// Format milliseconds as `mm:ss`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
