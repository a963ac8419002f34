//! Debris Track - trajectory prediction dashboard
//!
//! Fetches one two-line element set from the Celestrak stations feed,
//! propagates it with SGP4, and renders the predicted trajectory for the
//! next 24 hours together with the live position and velocity.

mod data;
mod propagation;
mod render;
mod ui;

use anyhow::{Context, Result};
use eframe::egui;

use data::{fetch_element_set, ElementSet, FEED_URL};
use propagation::{
    query_current_state, sample_trajectory, samples_per_window, Epoch, PropagationError,
    Sgp4Propagator, StateVector, Trajectory,
};
use render::{draw_scene, Camera};
use ui::StatePanel;

/// Prediction window length in hours
const WINDOW_HOURS: f64 = 24.0;

/// How often the live state readout refreshes, in seconds
const STATE_REFRESH_SECONDS: f64 = 1.0;

/// Application state
pub struct DebrisTrackApp {
    elements: ElementSet,
    propagator: Sgp4Propagator,

    // Prediction window, computed once at startup
    window_start: chrono::DateTime<chrono::Utc>,
    trajectory: Trajectory,

    // Live state, refreshed on an accumulator
    current: Result<StateVector, PropagationError>,
    state_refresh_accumulator: f64,

    // Viewport
    camera: Camera,
    camera_drag: Option<egui::Pos2>,

    started: std::time::Instant,
    last_frame_time: std::time::Instant,
}

impl DebrisTrackApp {
    fn new(
        elements: ElementSet,
        propagator: Sgp4Propagator,
        trajectory: Trajectory,
        window_start: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let current = query_current_state(&propagator, Epoch::now());

        Self {
            elements,
            propagator,
            window_start,
            trajectory,
            current,
            state_refresh_accumulator: 0.0,
            camera: Camera::default(),
            camera_drag: None,
            started: std::time::Instant::now(),
            last_frame_time: std::time::Instant::now(),
        }
    }

    fn refresh_current_state(&mut self, frame_time: f64) {
        self.state_refresh_accumulator += frame_time.max(0.0);
        if self.state_refresh_accumulator < STATE_REFRESH_SECONDS {
            return;
        }
        self.state_refresh_accumulator = 0.0;

        self.current = query_current_state(&self.propagator, Epoch::now());
        if let Err(e) = &self.current {
            log::warn!("current-state query failed: {}", e);
        }
    }

    fn handle_camera_input(&mut self, ctx: &egui::Context, viewport_rect: egui::Rect) {
        let input = ctx.input(|i| i.clone());

        if let Some(pos) = input.pointer.hover_pos() {
            if viewport_rect.contains(pos) {
                // Scroll to zoom
                let scroll = input.raw_scroll_delta.y;
                if scroll != 0.0 {
                    self.camera.zoom(scroll * 0.1);
                }

                // Drag to orbit
                if input.pointer.button_down(egui::PointerButton::Primary) {
                    if let Some(last_pos) = self.camera_drag {
                        let delta = pos - last_pos;
                        if input.modifiers.shift {
                            self.camera.pan(delta.x, -delta.y);
                        } else {
                            self.camera.orbit(delta.x, delta.y);
                        }
                    }
                    self.camera_drag = Some(pos);
                } else {
                    self.camera_drag = None;
                }
            }
        }
    }

    fn render_viewport(&mut self, ui: &mut egui::Ui) {
        let viewport_rect = ui.available_rect_before_wrap();
        self.handle_camera_input(ui.ctx(), viewport_rect);

        let (response, painter) =
            ui.allocate_painter(viewport_rect.size(), egui::Sense::click_and_drag());

        let pulse = ((self.started.elapsed().as_secs_f64() * 4.0).sin() * 0.5 + 0.5) as f32;
        draw_scene(
            &painter,
            response.rect,
            &self.camera,
            &self.trajectory,
            self.current.as_ref().ok(),
            pulse,
        );

        painter.text(
            response.rect.left_top() + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Predicted trajectory, next {:.0} h from {}\n\
                 Drag to orbit | Shift+drag to pan | Scroll to zoom",
                WINDOW_HOURS,
                self.window_start.format("%Y-%m-%d %H:%M:%S UTC"),
            ),
            egui::FontId::monospace(12.0),
            egui::Color32::from_rgb(150, 150, 150),
        );
    }
}

impl eframe::App for DebrisTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = std::time::Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;

        self.refresh_current_state(frame_time);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Debris Track");
                ui.separator();
                ui.label(format!("Tracking: {}", self.elements.name));
                ui.separator();
                ui.label(format!(
                    "Window: {:.0} h from {}",
                    WINDOW_HOURS,
                    self.window_start.format("%H:%M:%S UTC")
                ));
                ui.separator();
                ui.label(format!(
                    "Samples: {}/{}",
                    self.trajectory.len(),
                    self.trajectory.requested
                ));
                ui.separator();
                if ui.button("Reset view").clicked() {
                    self.camera.reset();
                }
            });
        });

        egui::SidePanel::right("state_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                StatePanel::show(ui, &self.elements, &self.trajectory, &self.current);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_viewport(ui);
        });

        // Keep the pulse and the live readout moving
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Debris Track...");

    let elements = fetch_element_set(FEED_URL).context("failed to fetch element set")?;
    log::info!("Tracking object: {}", elements.name);

    let propagator = Sgp4Propagator::from_elements(&elements.line1, &elements.line2)
        .context("failed to build propagator from element lines")?;

    let window_start = chrono::Utc::now();
    let start = Epoch::from_datetime(&window_start);
    let sample_count = samples_per_window(WINDOW_HOURS);

    log::info!(
        "Sampling {} points over the next {:.0} hours",
        sample_count,
        WINDOW_HOURS
    );
    let trajectory = sample_trajectory(&propagator, start, WINDOW_HOURS, sample_count);
    log::info!(
        "Computed {} of {} trajectory points",
        trajectory.len(),
        sample_count
    );

    let app = DebrisTrackApp::new(elements, propagator, trajectory, window_start);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Debris Track - Trajectory Prediction"),
        ..Default::default()
    };

    eframe::run_native(
        "Debris Track",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
