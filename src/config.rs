/// Display and timing settings for a countdown
use std::time::Duration;

use crossterm::style::Color;

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_interval: Duration,
    /// Added to the deadline so the last frame reads 00:00.
    pub deadline_pad: Duration,
    pub separator: &'static str,
    pub blank: &'static str,
    pub expiry_color: Color,
    pub beep_sound: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            deadline_pad: Duration::from_secs(1),
            separator: ":",
            blank: " ",
            expiry_color: Color::Rgb { r: 255, g: 0, b: 0 },
            beep_sound: "\x07".to_string(), // ASCII bell character
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
