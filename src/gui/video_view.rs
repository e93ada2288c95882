use eframe::egui;

use crate::video::{fit_within, Frame};

/// Shows the current frame scaled to fit the available space.
pub struct VideoView {
    texture: Option<egui::TextureHandle>,
    generation: Option<u64>,
}

impl VideoView {
    pub fn new() -> Self {
        Self {
            texture: None,
            generation: None,
        }
    }

    /// Uploads `frame` if it changed since the last call.
    pub fn sync(&mut self, ctx: &egui::Context, frame: Option<&Frame>, generation: u64) {
        if self.generation == Some(generation) {
            return;
        }
        self.generation = Some(generation);

        let Some(frame) = frame else {
            self.texture = None;
            return;
        };

        let image = frame.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, glyph: Option<(&str, f32)>) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, egui::Rounding::ZERO, egui::Color32::BLACK);

            if let Some(texture) = &self.texture {
                let [width, height] = texture.size();
                let size = fit_within(width as u32, height as u32, rect.size());
                let image_rect = egui::Rect::from_center_size(rect.center(), size);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);
            } else {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Select a video to start",
                    egui::FontId::proportional(18.0),
                    ui.visuals().weak_text_color(),
                );
            }

            if let Some((glyph, opacity)) = glyph {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    egui::FontId::proportional(72.0),
                    egui::Color32::WHITE.gamma_multiply(opacity),
                );
            }
        }

        response
    }
}

impl Default for VideoView {
    fn default() -> Self {
        Self::new()
    }
}
