//! CLI output formatting.

use std::io::{self, Write};
use std::time::Duration;

use bestquote_core::quote::Quote;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a price with two decimals.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Write the winning quote to a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &str, quote: &Quote) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{} {} {}", quote.source, quote.symbol, format_price(quote.price))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_micro() {
        let s = format_duration(Duration::from_nanos(500));
        assert!(s.contains("µs"));
    }

    #[test]
    fn format_duration_milli() {
        let s = format_duration(Duration::from_millis(42));
        assert!(s.contains("ms"));
    }

    #[test]
    fn format_duration_seconds() {
        let s = format_duration(Duration::from_secs_f64(3.14));
        assert!(s.ends_with('s'));
    }

    #[test]
    fn format_duration_minutes() {
        let s = format_duration(Duration::from_secs(90));
        assert!(s.starts_with("1m"));
    }

    #[test]
    fn format_price_two_decimals() {
        assert_eq!(format_price(35.0), "35.00");
        assert_eq!(format_price(42.128), "42.13");
    }

    #[test]
    fn write_quote_to_file() {
        let dir = std::env::temp_dir().join("bestquote-output-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quote.txt");
        let quote = Quote::new("Reuters", "META", 42.0);
        write_to_file(path.to_str().unwrap(), &quote).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Reuters META 42.00\n");
    }
}
