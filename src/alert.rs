/// Audible completion alert. Best effort: every failure is ignored.
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

const MACOS_SOUNDS: &[&str] = &[
    "/System/Library/Sounds/Glass.aiff",
    "/System/Library/Sounds/Ping.aiff",
    "/System/Library/Sounds/Pop.aiff",
];

const LINUX_SOUNDS: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/sound-icons/bell.wav",
    "/usr/share/sounds/alsa/Front_Center.wav",
];

/// Candidate `(player, sound file)` pairs for the current platform, in the
/// order they are tried.
fn candidates() -> Vec<(&'static str, &'static str)> {
    if cfg!(target_os = "macos") {
        MACOS_SOUNDS.iter().map(|s| ("afplay", *s)).collect()
    } else if cfg!(target_os = "linux") {
        ["paplay", "aplay"]
            .iter()
            .flat_map(|player| LINUX_SOUNDS.iter().map(move |s| (*player, *s)))
            .collect()
    } else {
        Vec::new()
    }
}

fn play(player: &str, sound: &str) -> bool {
    Command::new(player)
        .arg(sound)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Plays a system sound, or writes `fallback` (normally the bell character)
/// to stdout when no player succeeds.
pub fn beep(fallback: &str) {
    for (player, sound) in candidates() {
        if play(player, sound) {
            debug!(player, sound, "alert played");
            return;
        }
    }

    debug!("no sound player available, ringing the bell");
    let mut out = io::stdout();
    if let Err(err) = out.write_all(fallback.as_bytes()).and_then(|()| out.flush()) {
        debug!(%err, "bell failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_player_is_not_fatal() {
        assert!(!play("definitely-not-a-sound-player", "/nowhere.wav"));
    }

    #[test]
    fn candidates_use_known_players() {
        for (player, sound) in candidates() {
            assert!(["afplay", "paplay", "aplay"].contains(&player));
            assert!(sound.starts_with('/'));
        }
    }
}
