pub const CURSOR_HOME: &str = "\x1b[H";
pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CLEAR_TO_EOL: &str = "\x1b[K";
pub const CLEAR_TO_EOS: &str = "\x1b[J";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
pub const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
pub const RESET: &str = "\x1b[0m";

pub fn fg(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Normal,
    Alternate,
}

impl ScreenMode {
    pub fn from_alt(alt_screen: bool) -> Self {
        if alt_screen {
            ScreenMode::Alternate
        } else {
            ScreenMode::Normal
        }
    }

    /// Clears the screen, homes the cursor and hides it.
    pub fn start_sequence(self) -> String {
        match self {
            ScreenMode::Normal => [CLEAR_SCREEN, CURSOR_HOME, HIDE_CURSOR].concat(),
            ScreenMode::Alternate => {
                [ENTER_ALT_SCREEN, CLEAR_SCREEN, CURSOR_HOME, HIDE_CURSOR].concat()
            }
        }
    }

    pub fn end_sequence(self) -> String {
        match self {
            ScreenMode::Normal => SHOW_CURSOR.to_string(),
            ScreenMode::Alternate => [SHOW_CURSOR, LEAVE_ALT_SCREEN].concat(),
        }
    }
}
