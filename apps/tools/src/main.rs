use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use fleet_core::{
    command_channel, load_settings, load_settings_from, Fleet, FleetScheduler, RideSettings,
};
use shared::{
    domain::BoatId,
    protocol::{BoatSnapshot, CommandOutcome, FleetCommand, FleetEvent},
};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(about = "Headless tools for the ride fleet model")]
struct Cli {
    /// Settings file; defaults to ./ride.toml or $RIDE_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Advance a fresh fleet a number of ticks without waiting on timers.
    Simulate {
        #[arg(long, default_value_t = 1)]
        ticks: usize,
        /// Boats to stop before the first tick.
        #[arg(long = "stop")]
        stop: Vec<i64>,
        /// Boats to take out of service before the first tick.
        #[arg(long = "remove")]
        remove: Vec<i64>,
        /// Print the final fleet as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Run the real-time scheduler and print every event.
    Watch {
        /// Stop after this many advance ticks; runs until Ctrl-C otherwise.
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Print the effective settings as TOML.
    ShowConfig,
}

fn resolve_settings(config: Option<&PathBuf>) -> Result<RideSettings> {
    match config {
        Some(path) => load_settings_from(Some(path.as_path()), |key| std::env::var(key).ok()),
        None => load_settings(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
    let cli = Cli::parse();
    let settings =
        resolve_settings(cli.config.as_ref()).context("failed to load ride settings")?;

    match cli.command {
        Command::Simulate {
            ticks,
            stop,
            remove,
            json,
        } => {
            let fleet = simulate(&settings, ticks, &stop, &remove);
            if json {
                println!("{}", serde_json::to_string_pretty(&fleet.snapshot())?);
            } else {
                print_fleet(&fleet.snapshot(), settings.history_display_limit);
            }
        }
        Command::Watch { ticks } => watch(&settings, ticks).await,
        Command::ShowConfig => print!("{}", toml::to_string(&settings)?),
    }

    Ok(())
}

fn simulate(settings: &RideSettings, ticks: usize, stop: &[i64], remove: &[i64]) -> Fleet {
    let mut fleet = Fleet::new(settings.fleet_size);
    let now = Local::now().time();

    let setup = stop
        .iter()
        .map(|id| FleetCommand::Stop { boat_id: BoatId(*id) })
        .chain(remove.iter().map(|id| FleetCommand::Remove { boat_id: BoatId(*id) }));
    for command in setup {
        if let CommandOutcome::Ignored(reason) = fleet.apply(command, now) {
            eprintln!("ignored {}: {reason}", command.name());
        }
    }

    for _ in 0..ticks {
        fleet.advance(Local::now().time());
    }
    fleet
}

async fn watch(settings: &RideSettings, ticks: Option<u64>) {
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut stop_tx = Some(stop_tx);
    let mut advanced = 0u64;

    let observer = move |event: FleetEvent| {
        match &event {
            FleetEvent::Started { boats } => println!("started: {} boats", boats.len()),
            FleetEvent::Advanced { moved, .. } => {
                advanced += 1;
                let moved = moved.iter().map(ToString::to_string).collect::<Vec<_>>();
                println!("tick {advanced}: moved [{}]", moved.join(", "));
            }
            FleetEvent::CommandHandled { command, outcome, .. } => {
                println!("{}", describe_handled(command, outcome))
            }
            FleetEvent::BlinkToggled => println!("blink"),
        }
        if ticks.is_some_and(|limit| advanced >= limit) {
            if let Some(tx) = stop_tx.take() {
                let _ = tx.send(());
            }
        }
    };

    let (_cmd_tx, cmd_rx) = command_channel();
    let scheduler = FleetScheduler::new(Fleet::new(settings.fleet_size), settings, observer);
    let shutdown = async move {
        tokio::select! {
            _ = stop_rx => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    tracing::error!("failed to listen for ctrl-c: {err}");
                }
            }
        }
    };

    let fleet = scheduler.run_until(cmd_rx, shutdown).await;
    print_fleet(&fleet.snapshot(), settings.history_display_limit);
}

fn describe_handled(command: &FleetCommand, outcome: &CommandOutcome) -> String {
    let outcome = match outcome {
        CommandOutcome::Applied => "applied".to_string(),
        CommandOutcome::Ignored(reason) => format!("ignored ({reason})"),
    };
    match command.boat_id() {
        Some(boat_id) => format!("{} {boat_id}: {outcome}", command.name()),
        None => format!("{}: {outcome}", command.name()),
    }
}

fn print_fleet(boats: &[BoatSnapshot], history_limit: usize) {
    for boat in boats {
        println!(
            "{:<8} {:<12} {:<6} {}",
            boat.boat_id.to_string(),
            boat.scene.label(),
            boat.phase.label(),
            boat.status().label()
        );
        for entry in boat.recent_history(history_limit) {
            println!("    {entry}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_applies_setup_before_ticking() {
        let settings = RideSettings::default();

        let fleet = simulate(&settings, 2, &[1], &[2, 99]);

        let boats = fleet.snapshot();
        assert!(boats[0].history.is_empty());
        assert!(!boats[0].running);
        assert!(!boats[1].active);
        assert!(boats[1].history.is_empty());
        assert_eq!(boats[2].history.len(), 2);
    }

    #[test]
    fn handled_commands_name_their_target_boat() {
        let stop = FleetCommand::Stop { boat_id: BoatId(4) };
        assert_eq!(
            describe_handled(&stop, &CommandOutcome::Applied),
            "stop Boat 4: applied"
        );

        let start = FleetCommand::Start { boat_id: BoatId(9) };
        let ignored = CommandOutcome::Ignored(shared::error::IgnoreReason::BoatRemoved(BoatId(9)));
        assert_eq!(
            describe_handled(&start, &ignored),
            "start Boat 9: ignored (Boat 9 is out of commission)"
        );

        assert_eq!(
            describe_handled(&FleetCommand::StopAll, &CommandOutcome::Applied),
            "stop_all: applied"
        );
    }

    #[test]
    fn logs_at_info_unless_overridden() {
        assert_eq!(DEFAULT_LOG_FILTER, "info");
    }
}
