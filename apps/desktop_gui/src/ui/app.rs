use std::time::Duration;

use crossbeam_channel::Receiver;
use eframe::egui;
use fleet_core::RideSettings;
use shared::{
    domain::{BoatId, Phase, Scene},
    protocol::FleetCommand,
};
use tokio::sync::mpsc::Sender;

use crate::controller::{
    events::UiEvent, orchestration::dispatch_fleet_command, reducer::DashboardState,
};
use crate::ui::display::{self, CardStyle};

const CARD_WIDTH: f32 = 150.0;
const HISTORY_LOG_HEIGHT: f32 = 150.0;

/// Operator-side selection. Only one boat is targeted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    boat_id: BoatId,
    scene: Scene,
    phase: Phase,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            boat_id: BoatId(1),
            scene: Scene::Scene1,
            phase: Phase::Start,
        }
    }
}

pub struct RideControlApp {
    cmd_tx: Sender<FleetCommand>,
    ui_rx: Receiver<UiEvent>,
    history_display_limit: usize,
    fleet_size: usize,

    dashboard: DashboardState,
    selection: Selection,
}

impl RideControlApp {
    pub fn new(
        cmd_tx: Sender<FleetCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &RideSettings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            history_display_limit: settings.history_display_limit,
            fleet_size: settings.fleet_size,
            dashboard: DashboardState::new(),
            selection: Selection::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.dashboard.reduce(event);
        }
    }

    fn send(&mut self, command: FleetCommand) {
        if let Err(err) = dispatch_fleet_command(&self.cmd_tx, command) {
            self.dashboard.reduce(UiEvent::Error(err));
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.dashboard.banner.clone() else {
            return;
        };
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(0xff, 0xcc, 0xcc))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        egui::Color32::DARK_RED,
                        format!("{}: {}", banner.context().label(), banner.message()),
                    );
                    if !banner.is_fatal() && ui.small_button("Dismiss").clicked() {
                        self.dashboard.dismiss_banner();
                    }
                });
            });
    }

    fn show_boat_grid(&self, ui: &mut egui::Ui) {
        egui::Grid::new("boat_grid")
            .spacing([8.0, 8.0])
            .min_col_width(CARD_WIDTH)
            .show(ui, |ui| {
                for scene in Scene::ALL {
                    ui.label(egui::RichText::new(scene.label()).strong());
                    for boat in display::boats_in_scene(&self.dashboard.boats, scene) {
                        let style = CardStyle::for_boat(boat, self.dashboard.blink_on);
                        boat_card(ui, &display::card_label(boat), style);
                    }
                    ui.end_row();
                }
            });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(display::CONTROL_FRAME)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.boat_selector(ui);
                    let boat_id = self.selection.boat_id;
                    if control_button(ui, "Stop Selected") {
                        self.send(FleetCommand::Stop { boat_id });
                    }
                    if control_button(ui, "Start Selected") {
                        self.send(FleetCommand::Start { boat_id });
                    }
                    if control_button(ui, "Remove Boat") {
                        self.send(FleetCommand::Remove { boat_id });
                    }
                    if control_button(ui, "Restore Boat") {
                        let Selection {
                            boat_id,
                            scene,
                            phase,
                        } = self.selection;
                        self.send(FleetCommand::Restore {
                            boat_id,
                            scene,
                            phase,
                        });
                    }
                });

                ui.horizontal(|ui| {
                    self.scene_selector(ui);
                    self.phase_selector(ui);
                    if control_button(ui, "Move Boat to Selected Scene") {
                        let Selection {
                            boat_id,
                            scene,
                            phase,
                        } = self.selection;
                        self.send(FleetCommand::AssignScene {
                            boat_id,
                            scene,
                            phase,
                        });
                    }
                });

                ui.horizontal(|ui| {
                    if emergency_button(ui, "Emergency Stop All") {
                        self.send(FleetCommand::StopAll);
                    }
                    if emergency_button(ui, "Start All Boat") {
                        self.send(FleetCommand::StartAll);
                    }
                });

                ui.separator();
                ui.label("Boat Movement Log:");
                let log =
                    display::movement_log(&self.dashboard.boats, self.history_display_limit);
                egui::Frame::new()
                    .fill(egui::Color32::WHITE)
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::same(5))
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .max_height(HISTORY_LOG_HEIGHT)
                            .auto_shrink([false, true])
                            .show(ui, |ui| {
                                ui.monospace(log);
                            });
                    });
            });
    }

    fn boat_selector(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_salt("boat_selector")
            .selected_text(self.selection.boat_id.to_string())
            .show_ui(ui, |ui| {
                for id in 1..=self.fleet_size as i64 {
                    let boat_id = BoatId(id);
                    ui.selectable_value(
                        &mut self.selection.boat_id,
                        boat_id,
                        boat_id.to_string(),
                    );
                }
            });
    }

    fn scene_selector(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_salt("scene_selector")
            .selected_text(self.selection.scene.label())
            .show_ui(ui, |ui| {
                for scene in Scene::ALL {
                    ui.selectable_value(&mut self.selection.scene, scene, scene.label());
                }
            });
    }

    fn phase_selector(&mut self, ui: &mut egui::Ui) {
        egui::ComboBox::from_id_salt("phase_selector")
            .selected_text(self.selection.phase.label())
            .show_ui(ui, |ui| {
                for phase in Phase::ALL {
                    ui.selectable_value(&mut self.selection.phase, phase, phase.label());
                }
            });
    }

    fn show_dashboard(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls")
            .frame(dashboard_frame())
            .show(ctx, |ui| {
                self.show_controls(ui);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.dashboard.status).small());
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "Ticks: {}  Ignored commands: {}",
                            self.dashboard.ticks, self.dashboard.ignored
                        ))
                        .small(),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(dashboard_frame())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("Ride Vehicle Tracker").size(20.0).strong());
                });
                self.show_status_banner(ui);
                ui.add_space(6.0);
                egui::ScrollArea::both().show(ui, |ui| self.show_boat_grid(ui));
            });
    }
}

fn dashboard_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(display::WINDOW_BACKGROUND)
        .inner_margin(egui::Margin::same(8))
}

fn boat_card(ui: &mut egui::Ui, label: &str, style: CardStyle) {
    egui::Frame::new()
        .fill(style.fill())
        .stroke(egui::Stroke::new(1.0, display::CARD_BORDER))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(label).color(egui::Color32::BLACK));
            });
        });
}

fn control_button(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add(egui::Button::new(label).fill(display::CONTROL_BUTTON))
        .clicked()
}

fn emergency_button(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add(
        egui::Button::new(egui::RichText::new(label).strong())
            .fill(display::EMERGENCY_BUTTON)
            .min_size(egui::vec2(160.0, 32.0)),
    )
    .clicked()
}

impl eframe::App for RideControlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_dashboard(ctx);

        // Scheduler events request their own repaints; this only keeps the
        // banner and queue state fresh if one is dropped.
        ctx.request_repaint_after(Duration::from_millis(500));
    }
}
