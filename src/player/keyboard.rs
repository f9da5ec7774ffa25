/// Player command bound to a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlay,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    NextEpisode,
    ToggleEpisodeList,
    /// Leave fullscreen, or close the player when not fullscreen
    Escape,
}

impl KeyAction {
    /// Map a key name as reported by the platform (`" "`, `"ArrowLeft"`,
    /// `"m"`, ...) to its action. Letter keys are case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key {
            " " | "Space" | "Spacebar" => KeyAction::TogglePlay,
            "ArrowLeft" | "Left" => KeyAction::SeekBackward,
            "ArrowRight" | "Right" => KeyAction::SeekForward,
            "ArrowUp" | "Up" => KeyAction::VolumeUp,
            "ArrowDown" | "Down" => KeyAction::VolumeDown,
            "Escape" | "Esc" => KeyAction::Escape,
            other => match other.to_ascii_lowercase().as_str() {
                "k" => KeyAction::TogglePlay,
                "m" => KeyAction::ToggleMute,
                "f" => KeyAction::ToggleFullscreen,
                "n" => KeyAction::NextEpisode,
                "e" => KeyAction::ToggleEpisodeList,
                _ => return None,
            },
        };
        Some(action)
    }
}
