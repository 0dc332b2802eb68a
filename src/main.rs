use std::env;
use std::io;
use std::process;
use std::time::Duration;

use chrono::Local;
use tracing_subscriber::EnvFilter;

mod alert;
mod clock;
mod config;
mod cycler;
mod duration;
mod error;
mod interrupt;
mod palette;
mod terminal;
mod timer;

use clock::SystemClock;
use config::Config;
use error::Error;
use interrupt::Interrupt;
use terminal::{CrosstermTerminal, Terminal};
use timer::{Countdown, Outcome};

const USAGE: [&str; 2] = ["Usage: timer <duration>", "timer 2m30s"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let duration = match duration_from_args(&args) {
        Some(duration) => duration,
        None => {
            for line in USAGE {
                println!("{line}");
            }
            process::exit(1);
        }
    };

    if let Err(e) = run(duration) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Expects exactly one argument after the program name.
fn duration_from_args(args: &[String]) -> Option<Duration> {
    let [_, input] = args else {
        return None;
    };
    match duration::parse(input) {
        Ok(duration) => Some(duration),
        Err(err) => {
            tracing::info!(%err, "duration rejected");
            None
        }
    }
}

fn run(duration: Duration) -> Result<(), Error> {
    let config = Config::new();
    let palette = palette::load()?;
    let interrupt = Interrupt::install()?;

    println!("Starting {} timer.", duration::format(duration));

    let mut terminal = CrosstermTerminal::new(io::stdout());
    let mut countdown = Countdown::new(duration, palette, &config);
    let outcome = countdown.run(&mut terminal, &SystemClock, &interrupt);
    tracing::debug!(state = ?countdown.state(), "countdown returned");
    if outcome == Outcome::Interrupted {
        process::exit(0);
    }
    // Ctrl-C from here on exits straight from the signal handler.
    drop(interrupt);

    let expired_at = Local::now().format("%-I:%M%p");
    let message = format!("Timer expired at {expired_at}");
    if let Err(err) = terminal.write_colored(&message, config.expiry_color) {
        tracing::debug!(%err, "completion message failed");
    }
    println!();

    alert::beep(&config.beep_sound);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_argument_is_parsed() {
        assert_eq!(
            duration_from_args(&args(&["timer", "2m30s"])),
            Some(Duration::from_secs(150))
        );
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert_eq!(duration_from_args(&args(&["timer"])), None);
        assert_eq!(duration_from_args(&args(&["timer", "1m", "2m"])), None);
        assert_eq!(duration_from_args(&[]), None);
    }

    #[test]
    fn bad_duration_is_rejected() {
        assert_eq!(duration_from_args(&args(&["timer", "notaduration"])), None);
        assert_eq!(duration_from_args(&args(&["timer", "-3s"])), None);
    }
}
