//! Dashboard panels: element set details and the live state readout

use egui::{Color32, Grid, RichText, Ui};

use crate::data::ElementSet;
use crate::propagation::{PropagationError, StateVector, Trajectory};

/// Right-hand panel with the tracked object's elements, its current state,
/// and the health of the prediction window.
pub struct StatePanel;

impl StatePanel {
    pub fn show(
        ui: &mut Ui,
        elements: &ElementSet,
        trajectory: &Trajectory,
        current: &Result<StateVector, PropagationError>,
    ) {
        ui.heading(&elements.name);
        ui.separator();

        ui.label(RichText::new("Element set").strong());
        ui.label(RichText::new(&elements.line1).monospace().size(9.5));
        ui.label(RichText::new(&elements.line2).monospace().size(9.5));

        ui.separator();
        ui.heading("Current State");
        match current {
            Ok(state) => {
                Grid::new("state_grid")
                    .num_columns(2)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Position (TEME):");
                        ui.label(format!(
                            "({:.0}, {:.0}, {:.0}) km",
                            state.position[0], state.position[1], state.position[2]
                        ));
                        ui.end_row();

                        ui.label("Velocity:");
                        ui.label(format!(
                            "({:.2}, {:.2}, {:.2}) km/s",
                            state.velocity[0], state.velocity[1], state.velocity[2]
                        ));
                        ui.end_row();

                        ui.label("Speed:");
                        ui.label(format!("{:.2} km/s", state.speed_kms()));
                        ui.end_row();

                        ui.label("Altitude:");
                        ui.label(format!("{:.1} km", state.altitude_km()));
                        ui.end_row();
                    });
            }
            Err(e) => {
                ui.colored_label(
                    Color32::from_rgb(200, 120, 120),
                    format!("Current state unavailable: {}", e),
                );
            }
        }

        ui.separator();
        ui.heading("Prediction Window");
        ui.label(format!(
            "{} of {} samples computed",
            trajectory.len(),
            trajectory.requested
        ));
        if trajectory.failed() > 0 {
            ui.colored_label(
                Color32::from_rgb(230, 180, 80),
                format!(
                    "{} sample(s) failed to propagate and were dropped",
                    trajectory.failed()
                ),
            );
        }
        if trajectory.is_empty() {
            ui.colored_label(
                Color32::from_rgb(200, 120, 120),
                "No trajectory could be computed for this window",
            );
        }
    }
}
