// Multi-language support module
// Localized UI strings for English and Vietnamese

use tracing::warn;

#[derive(Clone, Debug)]
pub struct Assets {
    pub title: &'static str,

    // Menu screen
    pub menu_start: &'static str,
    pub menu_won: &'static str,
    pub menu_lost: &'static str,

    // Status bar
    pub status_mines_fmt: &'static str, // "Mines: {}"
    pub status_restart: &'static str,
    pub status_quit: &'static str,

    // Terminal size messages
    pub tsmsg_title: &'static str,
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2_fmt: &'static str, // "Minimum required: {}"
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        title: "DO MIN",
        menu_start: "Click to Start Game",
        menu_won: "You cleared the board!",
        menu_lost: "Game Over!",
        status_mines_fmt: "Mines: {}",
        status_restart: "restart",
        status_quit: "Esc: Exit",
        tsmsg_title: "Resize Terminal",
        tsmsg_line1: "Terminal size too small.",
        tsmsg_line2_fmt: "Minimum required: {}",
    }
}

/// Returns Vietnamese language assets
pub fn vietnamese_assets() -> Assets {
    Assets {
        title: "DÒ MÌN",
        menu_start: "Nhấn chuột để bắt đầu",
        menu_won: "Bạn đã dọn sạch bãi mìn!",
        menu_lost: "Thua rồi!",
        status_mines_fmt: "Mìn: {}",
        status_restart: "chơi lại",
        status_quit: "Esc: Thoát",
        tsmsg_title: "Đổi kích thước",
        tsmsg_line1: "Cửa sổ terminal quá nhỏ.",
        tsmsg_line2_fmt: "Tối thiểu: {}",
    }
}

/// Holds the current language code and active string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Creates a new Lang instance from a language code
    /// Normalizes input (e.g., "vi-VN" → "vi") and falls back to English for unsupported languages
    pub fn new(lang_code: &str) -> Self {
        let normalized = lang_code.to_lowercase();
        let code = if normalized.starts_with("vi") {
            "vi"
        } else {
            if !normalized.starts_with("en") {
                warn!(lang = lang_code, "unsupported language, falling back to English");
            }
            "en"
        };

        Lang {
            current_lang: code.to_string(),
            assets: if code == "vi" {
                vietnamese_assets()
            } else {
                english_assets()
            },
        }
    }

    /// Substitute a value into a "{}" format string from the assets
    pub fn fill(fmt: &str, value: impl std::fmt::Display) -> String {
        fmt.replacen("{}", &value.to_string(), 1)
    }
}
