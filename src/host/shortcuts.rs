/// Host actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleMode,
    OpenFile,
    SaveFile,
}

/// Maps a key press to its command. Only Ctrl+E, Ctrl+O and Ctrl+S are bound.
pub fn command_for(ctrl: bool, key: &str) -> Option<Command> {
    if !ctrl {
        return None;
    }
    match key {
        "e" => Some(Command::ToggleMode),
        "o" => Some(Command::OpenFile),
        "s" => Some(Command::SaveFile),
        _ => None,
    }
}
