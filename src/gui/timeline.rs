use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineAction {
    BeginScrub,
    ScrubTo(i64),
    EndScrub(i64),
}

/// Frame slider. Follows playback unless the user is dragging it.
pub struct TimelineWidget {
    pub slider_value: usize,
}

impl TimelineWidget {
    pub fn new() -> Self {
        Self { slider_value: 0 }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        current_index: usize,
        frame_count: usize,
        scrubbing: bool,
    ) -> Vec<TimelineAction> {
        let last = frame_count.saturating_sub(1);
        if !scrubbing {
            self.slider_value = current_index;
        }
        self.slider_value = self.slider_value.min(last);

        let mut actions = Vec::new();
        ui.horizontal(|ui| {
            ui.spacing_mut().slider_width = (ui.available_width() - 8.0).max(50.0);
            let response = ui.add_enabled(
                frame_count > 0,
                egui::Slider::new(&mut self.slider_value, 0..=last).show_value(false),
            );

            if response.drag_started() {
                actions.push(TimelineAction::BeginScrub);
            }
            if response.changed() {
                actions.push(TimelineAction::ScrubTo(self.slider_value as i64));
            }
            if response.drag_stopped() {
                actions.push(TimelineAction::EndScrub(self.slider_value as i64));
            }
        });

        actions
    }
}

impl Default for TimelineWidget {
    fn default() -> Self {
        Self::new()
    }
}

pub fn frame_label(current_index: usize, frame_count: usize) -> String {
    format!("Frame: {} / {}", current_index, frame_count)
}
