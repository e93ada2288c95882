/// A user command forwarded from the shell to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePlayback,
    Step(i64),
    SaveFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoClick {
    Primary,
    Secondary,
}

/// Keys handled anywhere in the window.
pub const SHORTCUTS: [(egui::Key, Command); 4] = [
    (egui::Key::Space, Command::TogglePlayback),
    (egui::Key::S, Command::SaveFrame),
    (egui::Key::ArrowLeft, Command::Step(-1)),
    (egui::Key::ArrowRight, Command::Step(1)),
];

pub fn route_key(key: egui::Key) -> Option<Command> {
    SHORTCUTS
        .iter()
        .find(|(shortcut, _)| *shortcut == key)
        .map(|(_, command)| *command)
}

pub fn route_click(click: VideoClick) -> Command {
    match click {
        VideoClick::Primary => Command::TogglePlayback,
        // Saves without touching playback, like the S key
        VideoClick::Secondary => Command::SaveFrame,
    }
}
