//! Trajectory viewport: projects the sampled track through the camera and
//! paints it with the egui painter

use egui::{Color32, Painter, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3, Vec4};
use nalgebra::Vector3;

use crate::propagation::{StateVector, Trajectory, EARTH_RADIUS_KM};

use super::Camera;

const TRAJECTORY_COLOR: [f32; 3] = [0.0, 1.0, 0.6];

/// TEME (Z up the polar axis) to the render frame (Y up), km to Earth radii.
///
/// Right-handedness is preserved: TEME X -> X, TEME Z -> Y, TEME Y -> -Z.
pub fn teme_to_render(position_km: &Vector3<f64>) -> Vec3 {
    Vec3::new(
        (position_km[0] / EARTH_RADIUS_KM) as f32,
        (position_km[2] / EARTH_RADIUS_KM) as f32,
        (-position_km[1] / EARTH_RADIUS_KM) as f32,
    )
}

/// Project a render-frame point to screen space, if it lands inside the
/// clip volume in front of the camera.
pub fn project(vp: &Mat4, rect: &Rect, point: Vec3) -> Option<Pos2> {
    let clip = *vp * Vec4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
    if ndc.z <= 0.0 || ndc.z >= 1.0 {
        return None;
    }
    let center = rect.center();
    Some(egui::pos2(
        center.x + ndc.x * rect.width() * 0.5,
        center.y - ndc.y * rect.height() * 0.5,
    ))
}

/// Paint the whole scene: background, Earth, TEME axes, the predicted
/// trajectory, and the current-position marker.
pub fn draw_scene(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    trajectory: &Trajectory,
    current: Option<&StateVector>,
    pulse: f32,
) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(5, 5, 15));

    let aspect = rect.width() / rect.height();
    let vp = camera.view_projection_matrix(aspect);

    draw_earth(painter, &vp, &rect, camera);
    draw_axes(painter, &vp, &rect);
    draw_trajectory(painter, &vp, &rect, trajectory);

    if let Some(state) = current {
        draw_current_marker(painter, &vp, &rect, state, pulse);
    }
}

fn draw_earth(painter: &Painter, vp: &Mat4, rect: &Rect, camera: &Camera) {
    let Some(center) = project(vp, rect, Vec3::ZERO) else {
        return;
    };
    let scale = rect.height().min(rect.width()) * 0.35;
    let earth_radius = scale / camera.distance;

    painter.circle_filled(center, earth_radius, Color32::from_rgb(25, 60, 120));
    painter.circle_stroke(
        center,
        earth_radius,
        Stroke::new(2.0, Color32::from_rgb(50, 100, 180)),
    );

    // Atmosphere glow
    for i in 1..=3 {
        let r = earth_radius * (1.0 + i as f32 * 0.03);
        let alpha = (40 - i * 10) as u8;
        painter.circle_stroke(
            center,
            r,
            Stroke::new(2.0, Color32::from_rgba_unmultiplied(100, 150, 255, alpha)),
        );
    }
}

fn draw_axes(painter: &Painter, vp: &Mat4, rect: &Rect) {
    let axes = [
        (Vector3::x(), "X (km)", Color32::from_rgb(220, 90, 90)),
        (Vector3::y(), "Y (km)", Color32::from_rgb(90, 220, 90)),
        (Vector3::z(), "Z (km)", Color32::from_rgb(110, 140, 255)),
    ];

    for (axis, label, color) in axes {
        let tip_km: Vector3<f64> = axis * (1.5 * EARTH_RADIUS_KM);
        let origin = project(vp, rect, Vec3::ZERO);
        let tip = project(vp, rect, teme_to_render(&tip_km));
        if let (Some(origin), Some(tip)) = (origin, tip) {
            painter.line_segment([origin, tip], Stroke::new(1.0, color.gamma_multiply(0.6)));
            painter.text(
                tip,
                egui::Align2::CENTER_BOTTOM,
                label,
                egui::FontId::proportional(11.0),
                color,
            );
        }
    }
}

fn draw_trajectory(painter: &Painter, vp: &Mat4, rect: &Rect, trajectory: &Trajectory) {
    let count = trajectory.len();
    if count < 2 {
        return;
    }

    let mut previous: Option<Pos2> = None;
    for (i, point) in trajectory.points.iter().enumerate() {
        let screen = project(vp, rect, teme_to_render(&point.position));

        if let (Some(prev), Some(next)) = (previous, screen) {
            // Brightness ramps from the start of the window toward its end
            let t = i as f32 / (count - 1).max(1) as f32;
            let brightness = 0.4 + 0.6 * t;
            let color = Color32::from_rgba_unmultiplied(
                (TRAJECTORY_COLOR[0] * brightness * 255.0) as u8,
                (TRAJECTORY_COLOR[1] * brightness * 255.0) as u8,
                (TRAJECTORY_COLOR[2] * brightness * 255.0) as u8,
                200,
            );
            painter.line_segment([prev, next], Stroke::new(1.5, color));
        }

        previous = screen;
    }
}

fn draw_current_marker(painter: &Painter, vp: &Mat4, rect: &Rect, state: &StateVector, pulse: f32) {
    let Some(screen) = project(vp, rect, teme_to_render(&state.position)) else {
        return;
    };

    painter.circle_filled(screen, 4.0, Color32::WHITE);
    let ring_size = 10.0 + pulse * 4.0;
    painter.circle_stroke(screen, ring_size, Stroke::new(2.0, Color32::WHITE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_target_projects_to_viewport_center() {
        let camera = Camera::default();
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let vp = camera.view_projection_matrix(rect.width() / rect.height());

        let screen = project(&vp, &rect, Vec3::ZERO).unwrap();
        assert!((screen.x - 400.0).abs() < 0.5);
        assert!((screen.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let camera = Camera {
            azimuth: 0.0,
            elevation: 0.0,
            ..Camera::default()
        };
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let vp = camera.view_projection_matrix(rect.width() / rect.height());

        // Camera sits on +Z looking at the origin; +Z beyond it is behind
        assert!(project(&vp, &rect, Vec3::new(0.0, 0.0, 50.0)).is_none());
    }

    #[test]
    fn teme_conversion_swaps_polar_axis_up() {
        let polar = Vector3::new(0.0, 0.0, EARTH_RADIUS_KM);
        let rendered = teme_to_render(&polar);
        assert!((rendered - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);

        let teme_y = Vector3::new(0.0, EARTH_RADIUS_KM, 0.0);
        let rendered = teme_to_render(&teme_y);
        assert!((rendered - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
