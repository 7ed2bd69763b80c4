//! CLI result presenter.

use std::time::Duration;

use bestquote_core::quote::Quote;
use bestquote_orchestration::interfaces::{FetchOutcome, ResultPresenter};

use crate::output::{format_duration, format_price};

/// Presents aggregation results on stdout/stderr.
pub struct CliResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CliResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CliResultPresenter {
    fn present_best(&self, quote: &Quote, elapsed: Duration, details: bool) {
        if self.quiet {
            println!("{}", format_price(quote.price));
            return;
        }

        println!("Best quote: {quote}");
        println!("Elapsed: {}", format_duration(elapsed));

        if details {
            println!("Source: {}", quote.source);
            println!("Symbol: {}", quote.symbol);
        }
    }

    fn present_outcomes(&self, outcomes: &[FetchOutcome]) {
        if self.quiet {
            return;
        }

        println!("\nPer-source outcomes:");
        println!("{:-<60}", "");
        for outcome in outcomes {
            let status = match &outcome.outcome {
                Ok(quote) => format_price(quote.price),
                Err(_) => "ERROR".to_string(),
            };
            println!(
                "  {:<20} {:>10} [{}]",
                outcome.source,
                format_duration(outcome.duration),
                status,
            );
            if self.verbose {
                if let Err(err) = &outcome.outcome {
                    println!("    {err}");
                }
            }
        }
    }

    fn present_error(&self, error: &str) {
        eprintln!("Error: {error}");
    }
}
