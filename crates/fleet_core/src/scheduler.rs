//! Periodic tick driver. A single task owns the [`Fleet`] and interleaves
//! advance ticks, blink ticks and operator commands, so fleet state is never
//! shared between threads.

use std::{future::Future, time::Duration};

use chrono::{Local, NaiveTime};
use shared::protocol::{FleetCommand, FleetEvent};
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{config::RideSettings, fleet::Fleet};

pub const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Receives every state change the scheduler makes. Rendering layers
/// implement this instead of reaching into the fleet.
pub trait FleetObserver: Send {
    fn on_event(&mut self, event: FleetEvent);
}

impl<F> FleetObserver for F
where
    F: FnMut(FleetEvent) + Send,
{
    fn on_event(&mut self, event: FleetEvent) {
        self(event)
    }
}

/// Wall-clock source for history timestamps.
pub trait Clock: Send {
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time of day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

pub fn command_channel() -> (mpsc::Sender<FleetCommand>, mpsc::Receiver<FleetCommand>) {
    mpsc::channel(COMMAND_QUEUE_CAPACITY)
}

pub struct FleetScheduler<O, C = LocalClock> {
    fleet: Fleet,
    observer: O,
    clock: C,
    advance_every: Duration,
    blink_every: Duration,
}

impl<O: FleetObserver> FleetScheduler<O, LocalClock> {
    pub fn new(fleet: Fleet, settings: &RideSettings, observer: O) -> Self {
        Self::with_clock(fleet, settings, observer, LocalClock)
    }
}

impl<O: FleetObserver, C: Clock> FleetScheduler<O, C> {
    pub fn with_clock(fleet: Fleet, settings: &RideSettings, observer: O, clock: C) -> Self {
        Self {
            fleet,
            observer,
            clock,
            advance_every: settings.advance_interval(),
            blink_every: settings.blink_interval(),
        }
    }

    /// Runs until every command sender is dropped.
    pub async fn run(self, commands: mpsc::Receiver<FleetCommand>) -> Fleet {
        self.run_until(commands, std::future::pending()).await
    }

    /// Runs until `shutdown` resolves or every command sender is dropped,
    /// then hands the fleet back. The first ticks fire one full interval
    /// after start.
    pub async fn run_until<S>(
        mut self,
        mut commands: mpsc::Receiver<FleetCommand>,
        shutdown: S,
    ) -> Fleet
    where
        S: Future<Output = ()>,
    {
        let mut advance = periodic(self.advance_every);
        let mut blink = periodic(self.blink_every);
        tokio::pin!(shutdown);

        info!(
            boats = self.fleet.len(),
            advance_ms = self.advance_every.as_millis() as u64,
            blink_ms = self.blink_every.as_millis() as u64,
            "fleet scheduler started"
        );
        self.observer.on_event(FleetEvent::Started {
            boats: self.fleet.snapshot(),
        });

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = advance.tick() => self.handle_advance(),
                _ = blink.tick() => self.observer.on_event(FleetEvent::BlinkToggled),
            }
        }

        info!("fleet scheduler stopped");
        self.fleet
    }

    fn handle_command(&mut self, command: FleetCommand) {
        let outcome = self.fleet.apply(command, self.clock.now());
        self.observer.on_event(FleetEvent::CommandHandled {
            command,
            outcome,
            boats: self.fleet.snapshot(),
        });
    }

    fn handle_advance(&mut self) {
        let moved = self.fleet.advance(self.clock.now());
        debug!(moved = moved.len(), "advance tick");
        self.observer.on_event(FleetEvent::Advanced {
            moved,
            boats: self.fleet.snapshot(),
        });
    }
}

fn periodic(every: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + every, every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
