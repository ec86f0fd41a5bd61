//! Science Manager Headless Harness
//!
//! Flies a sandbox vessel through a JSON scenario with the scheduler in the
//! loop and prints what it did. No game, no rendering.
//!
//! Usage:
//!   cargo run -p science-manager-cli
//!   cargo run -p science-manager-cli -- path/to/scenario.json --verbose
//!
//! Log verbosity follows `RUST_LOG` when set.

mod scenario;

use scenario::{RunSummary, Scenario, ScenarioError};
use science_manager_core::report::LineSource;
use science_manager_core::Event;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let path = args.iter().find(|a| !a.starts_with("--"));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(path.map(String::as_str), verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<&str>, verbose: bool) -> Result<(), ScenarioError> {
    let scenario = match path {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::builtin()?,
    };

    println!("=== Science Manager Harness: {} ===\n", scenario.vessel);
    let summary = scenario.run()?;

    if verbose {
        print_events(&summary);
    }
    print_summary(&scenario, &summary);
    Ok(())
}

fn print_events(summary: &RunSummary) {
    println!("── Events ──");
    for event in summary.events.events() {
        match event {
            Event::TransmissionStarted {
                tick,
                instrument_id,
                device_id,
                subject,
                value,
            } => println!(
                "  [{tick:>4}] {instrument_id} → {device_id}: {subject} ({value:.2} pts)"
            ),
            Event::ResetIssued {
                tick,
                instrument_id,
                cooldown,
            } => println!("  [{tick:>4}] reset {instrument_id} (cooldown {cooldown})"),
            other => println!(
                "  [{:>4}] {} {}",
                other.tick(),
                other.event_type(),
                other.instrument_id().unwrap_or("")
            ),
        }
    }
    println!();
}

fn print_summary(scenario: &Scenario, summary: &RunSummary) {
    let deploys: usize = summary.ticks.iter().map(|t| t.deployed).sum();
    let resets: usize = summary.ticks.iter().map(|t| t.resets).sum();

    println!("── Summary ──");
    println!("  Ticks:           {}", summary.ticks.len());
    println!(
        "  Mode:            {}",
        if scenario.auto_mode { "automatic" } else { "manual" }
    );
    println!("  Deploys:         {deploys}");
    println!("  Transmissions:   {}", summary.transmissions());
    println!("  Worthless resets: {resets}");
    println!("  Science banked:  {:.2}", summary.science_banked);

    let report = &summary.final_report;
    println!("\n── Still aboard ──");
    for (source, value) in report.valued_lines() {
        let place = match source {
            LineSource::Container { title } => title.as_str(),
            LineSource::Instrument { id, .. } => id.as_str(),
        };
        println!(
            "  {place:<24} {:<28} keep {:>6.2}  transmit {:>6.2}",
            value.data.title, value.keep, value.transmit
        );
    }
    println!(
        "  Total: keep {:.2}, transmit {:.2}, {:.1} data, {:.1} energy to send",
        report.return_science, report.transmit_science, report.data_amount, report.energy_cost
    );
}
