//! Shared colors for badges and status text.

use egui::Color32;
use livebet_business::Tone;

/// Forest green for success badges and positive amounts.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for errors and negative amounts.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for pending states.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

pub const COLOR_CYAN: Color32 = Color32::from_rgb(13, 202, 240);

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Success => COLOR_GREEN,
        Tone::Danger => COLOR_RED,
        Tone::Warning => COLOR_AMBER,
        Tone::Primary => COLOR_BLUE,
        Tone::Info => COLOR_CYAN,
        Tone::Neutral => Color32::GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_danger_differ() {
        assert_eq!(tone_color(Tone::Neutral), Color32::GRAY);
        assert_ne!(tone_color(Tone::Success), tone_color(Tone::Danger));
    }
}
