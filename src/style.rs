use eframe::egui;

// --- Sizing ---
pub const ICON_SIZE: f32 = 14.0;
pub const TREE_MIN_WIDTH: f32 = 120.0;
pub const PREVIEW_MIN_WIDTH: f32 = 150.0;
pub const MESSAGE_SIZE: f32 = 16.0;

// --- Split layout ---
pub const DEFAULT_SPLIT_FRACTION: f32 = 0.3;
pub const MIN_SPLIT_FRACTION: f32 = 0.05;
pub const MAX_SPLIT_FRACTION: f32 = 0.95;

// --- Preview limits ---
pub const MAX_PREVIEW_SIZE: u64 = 10 * 1024 * 1024;
pub const MAX_HIGHLIGHTED_LINES: usize = 1000;
pub const ARCHIVE_PREVIEW_ITEMS: usize = 100;

// --- Video sampling ---
pub const SAMPLE_SECONDS: f64 = 3.0;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const VIDEO_MAX_WIDTH: u32 = 640;

/// Clamp a persisted split fraction into the range the layout accepts.
pub fn clamp_split_fraction(fraction: f32) -> f32 {
    if fraction.is_finite() {
        fraction.clamp(MIN_SPLIT_FRACTION, MAX_SPLIT_FRACTION)
    } else {
        DEFAULT_SPLIT_FRACTION
    }
}

/// Width of the tree pane for a given split fraction and total width.
pub fn split_width(fraction: f32, total: f32) -> f32 {
    clamp_split_fraction(fraction) * total.max(0.0)
}

/// Fraction of the total width taken by the tree pane.
pub fn split_fraction(tree_width: f32, total: f32) -> f32 {
    if total <= 0.0 {
        return DEFAULT_SPLIT_FRACTION;
    }
    clamp_split_fraction(tree_width / total)
}

/// Largest size with `natural`'s aspect ratio that fits inside `bounds`.
///
/// Always scales, so small images are enlarged to fill the pane.
pub fn fit_size(natural: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if natural.x <= 0.0 || natural.y <= 0.0 || bounds.x <= 0.0 || bounds.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / natural.x).min(bounds.y / natural.y);
    natural * scale
}

pub fn window_width(ctx: &egui::Context) -> f32 {
    ctx.input(|i| i.screen_rect().width())
}

pub fn truncated_label(ui: &mut egui::Ui, text: impl Into<egui::WidgetText>) -> egui::Response {
    ui.add(egui::Label::new(text).truncate())
}

/// Centered, wrapped notice used by every preview surface for messages.
pub fn centered_message(ui: &mut egui::Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.add(egui::Label::new(egui::RichText::new(message).size(MESSAGE_SIZE)).wrap());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_round_trip() {
        let width = split_width(0.25, 1200.0);
        assert_eq!(width, 300.0);
        assert_eq!(split_fraction(width, 1200.0), 0.25);
    }

    #[test]
    fn split_fraction_is_clamped() {
        assert_eq!(clamp_split_fraction(2.0), MAX_SPLIT_FRACTION);
        assert_eq!(clamp_split_fraction(-1.0), MIN_SPLIT_FRACTION);
        assert_eq!(clamp_split_fraction(f32::NAN), DEFAULT_SPLIT_FRACTION);
        assert_eq!(split_fraction(100.0, 0.0), DEFAULT_SPLIT_FRACTION);
    }

    #[test]
    fn fit_size_preserves_aspect_ratio() {
        let fitted = fit_size(egui::vec2(400.0, 200.0), egui::vec2(100.0, 100.0));
        assert_eq!(fitted, egui::vec2(100.0, 50.0));

        let upscaled = fit_size(egui::vec2(10.0, 20.0), egui::vec2(300.0, 100.0));
        assert_eq!(upscaled, egui::vec2(50.0, 100.0));
    }

    #[test]
    fn fit_size_handles_empty_bounds() {
        assert_eq!(
            fit_size(egui::vec2(10.0, 10.0), egui::vec2(0.0, 50.0)),
            egui::Vec2::ZERO
        );
    }
}
