//! Runtime bridge: a dedicated thread runs the fleet scheduler and forwards
//! its events to the UI queue.

use std::thread;

use crossbeam_channel::{Sender, TrySendError};
use eframe::egui;
use fleet_core::{Fleet, FleetObserver, FleetScheduler, RideSettings};
use shared::protocol::{FleetCommand, FleetEvent};
use tokio::sync::mpsc::Receiver;

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Forwards scheduler events to the UI and wakes the egui loop.
pub struct UiEventForwarder {
    ui_tx: Sender<UiEvent>,
    repaint: Option<egui::Context>,
}

impl UiEventForwarder {
    pub fn new(ui_tx: Sender<UiEvent>, repaint: Option<egui::Context>) -> Self {
        Self { ui_tx, repaint }
    }
}

impl FleetObserver for UiEventForwarder {
    fn on_event(&mut self, event: FleetEvent) {
        match self.ui_tx.try_send(UiEvent::Fleet(event)) {
            Ok(()) => {}
            // Every fleet event carries a full snapshot, so a dropped one is
            // superseded by the next.
            Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping fleet event"),
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed");
                return;
            }
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

/// Starts the backend thread. The scheduler stops once the UI drops its
/// command sender.
pub fn launch(
    settings: RideSettings,
    cmd_rx: Receiver<FleetCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: Option<egui::Context>,
) {
    let spawned = thread::Builder::new()
        .name("fleet-scheduler".to_string())
        .spawn({
            let ui_tx = ui_tx.clone();
            move || run_backend(settings, cmd_rx, ui_tx, repaint)
        });

    if let Err(err) = spawned {
        tracing::error!("failed to spawn fleet scheduler thread: {err}");
        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
            UiErrorContext::BackendStartup,
            format!("backend worker startup failure: failed to spawn thread: {err}"),
        )));
    }
}

fn run_backend(
    settings: RideSettings,
    cmd_rx: Receiver<FleetCommand>,
    ui_tx: Sender<UiEvent>,
    repaint: Option<egui::Context>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let fleet = Fleet::new(settings.fleet_size);
    let observer = UiEventForwarder::new(ui_tx, repaint);
    let scheduler = FleetScheduler::new(fleet, &settings, observer);

    let fleet = runtime.block_on(scheduler.run(cmd_rx));
    tracing::info!(boats = fleet.len(), "backend worker exited");
}
