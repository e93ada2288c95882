use crate::input::{route_key, Command, SHORTCUTS};

/// Takes every recognized shortcut pressed this frame out of egui's input queue.
///
/// Consumed keys never reach widgets, so Space cannot also press a focused button.
pub fn take_shortcuts(ctx: &egui::Context) -> Vec<Command> {
    ctx.input_mut(|input| {
        SHORTCUTS
            .iter()
            .filter(|(key, _)| input.consume_key(egui::Modifiers::NONE, *key))
            .filter_map(|(key, _)| route_key(*key))
            .collect()
    })
}
