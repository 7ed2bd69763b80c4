//! Application entry point and dispatch.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use bestquote_cli::output::write_to_file;
use bestquote_cli::presenter::CliResultPresenter;
use bestquote_core::cancel::CancellationToken;
use bestquote_core::quote::{price_ascending, price_descending, Quote};
use bestquote_core::registry::DefaultFactory;
use bestquote_core::task::{FetchError, FetchTask};
use bestquote_orchestration::aggregator::{
    collect_outcomes, run_fetch, run_sequential, select_best, Mode, RunOptions,
};
use bestquote_orchestration::interfaces::ResultPresenter;
use bestquote_orchestration::pipeline::run_pipeline;
use bestquote_orchestration::selection::get_tasks_to_run;

use crate::config::AppConfig;
use crate::errors::exit_code;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        bestquote_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    run_cli(config)
}

fn run_cli(config: &AppConfig) -> Result<()> {
    let factory = DefaultFactory::new(&config.symbol, config.seed);
    let tasks = match get_tasks_to_run(&config.sources, &factory) {
        Ok(tasks) => tasks,
        Err(err) => return fail(config, &err),
    };

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let opts = RunOptions {
        fail_fast: config.fail_fast,
        timeout: Some(config.timeout_duration()),
    };
    let ordering: fn(&Quote, &Quote) -> Ordering = if config.descending {
        price_descending
    } else {
        price_ascending
    };

    let presenter = CliResultPresenter::new(config.verbose, config.quiet);
    let start = Instant::now();

    let result = match config.mode.as_str() {
        "all" => {
            // Two-phase so the per-source outcomes can be shown.
            match collect_outcomes(&pool, &tasks, &opts, &cancel) {
                Ok(outcomes) => {
                    if tasks.len() > 1 {
                        presenter.present_outcomes(&outcomes);
                    }
                    select_best(&outcomes, ordering)
                }
                Err(err) => Err(err),
            }
        }
        "race" => run_fetch(&pool, &tasks, ordering, Mode::RaceFirst, &opts, &cancel),
        "sync" => run_sequential(&tasks, ordering, &cancel),
        other => {
            anyhow::bail!("unknown mode: {other} (expected all, race, or sync)");
        }
    };
    let elapsed = start.elapsed();

    match result {
        Ok(best) => {
            presenter.present_best(&best, elapsed, config.details);

            if let Some(ref path) = config.output {
                write_to_file(path, &best)?;
            }

            if config.pipeline {
                run_winner_pipeline(&pool, &tasks, &best, config)?;
            }
            Ok(())
        }
        Err(err) => fail(config, &err),
    }
}

fn run_winner_pipeline(
    pool: &rayon::ThreadPool,
    tasks: &[Arc<dyn FetchTask>],
    best: &Quote,
    config: &AppConfig,
) -> Result<()> {
    let Some(winner) = tasks.iter().find(|t| t.name() == best.source) else {
        return Ok(());
    };
    // Fresh token: a race run has already cancelled the shared one.
    let cancel = CancellationToken::new();
    match run_pipeline(pool, winner, &cancel) {
        Ok(email) => {
            if !config.quiet {
                println!("Pipeline email: {email}");
            }
            Ok(())
        }
        Err(err) => fail(config, &err),
    }
}

fn fail(config: &AppConfig, err: &FetchError) -> Result<()> {
    let presenter = CliResultPresenter::new(config.verbose, config.quiet);
    presenter.present_error(&err.to_string());
    std::process::exit(exit_code(err));
}

fn ctrlc_handler(cancel: CancellationToken) {
    // A second registration only happens in tests that call run() twice,
    // so a failed registration is not fatal.
    let _ = ctrlc::set_handler(move || {
        cancel.cancel();
    });
}
