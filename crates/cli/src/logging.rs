use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use std::io::Write;
use std::time::Duration;

/// `HH:MM:SS target message`, `RUST_LOG` respected, `info` by default
pub fn init_logging() {
    let logging_env = Env::default().filter_or("RUST_LOG", "info");
    Builder::from_env(logging_env)
        .format(|buf, record| {
            let target = match record.level() {
                log::Level::Error => record.target().to_ascii_lowercase().bold().red(),
                log::Level::Warn => record.target().to_ascii_lowercase().bold().yellow(),
                _ => record.target().to_ascii_lowercase().bold().bright_yellow(),
            };
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                target,
                record.args()
            )
        })
        .init();
}

/// Short human duration, yellow past 100ms and red past a second
pub fn format_elapsed(elapsed: Duration) -> ColoredString {
    match elapsed.as_millis() {
        millis if millis >= 1000 => format!("{:.1}s", elapsed.as_secs_f64()).red(),
        millis if millis > 100 => format!("{}ms", millis).yellow(),
        millis if millis > 0 => format!("{}ms", millis).normal(),
        _ => format!("{}μs", elapsed.as_micros()).normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        colored::control::set_override(false);
        assert_eq!(format_elapsed(Duration::from_micros(250)).to_string(), "250μs");
        assert_eq!(format_elapsed(Duration::from_millis(42)).to_string(), "42ms");
        assert_eq!(format_elapsed(Duration::from_millis(1500)).to_string(), "1.5s");
    }
}
