// Centralized UI strings and labels. ASCII-friendly by default.

use unicode_width::UnicodeWidthStr;

use crate::app::EntryKind;

// Game log prefixes (render color applied in UI)
pub const PREFIX_CHAT: &str = "| ";
pub const PREFIX_SERVER: &str = "* ";
pub const PREFIX_CLIENT: &str = "- ";

pub const INPUT_HINT: &str = "Type a message or /command, Enter to send";
pub const WELCOME: &str =
    "Welcome back. Shift+Up/Down walks the input history; Esc or Ctrl-C leaves.";

// UI block titles (keep surrounding spaces for visual padding)
pub const TITLE_LOG: &str = " Game Log ";
pub const TITLE_INPUT: &str = " Say ";

// Status bar stick label
pub const STICK_BOTTOM: &str = "Bottom";

pub fn entry_prefix(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Chat => PREFIX_CHAT,
        EntryKind::Server => PREFIX_SERVER,
        EntryKind::Client => PREFIX_CLIENT,
    }
}

pub fn stick_lines(n: u16) -> String {
    format!("+{} lines", n)
}

pub fn build_stick_label(scroll: u16) -> String {
    if scroll == 0 {
        STICK_BOTTOM.to_string()
    } else {
        stick_lines(scroll)
    }
}

// Build the status bar line with width-aware compaction: segments are
// appended left to right until the width runs out.
pub fn build_status_line(
    stick: &str,
    character: Option<&str>,
    history_len: usize,
    max_width: u16,
) -> String {
    let mut segments: Vec<String> = Vec::new();
    segments.push(format!("[{}]", stick));
    if let Some(name) = character {
        segments.push(name.to_string());
    }
    segments.push(format!("Hist:{}", history_len));
    // Hints ordered by importance; appended if space allows.
    let hints: [&str; 5] = [
        "Enter: send",
        "Shift+Up/Down: history",
        "PgUp/PgDn: scroll",
        "Ctrl+U/K: kill line",
        "Esc/Ctrl-C: quit",
    ];
    for h in hints {
        segments.push(h.to_string());
    }

    let sep = "  |  ";
    let mut out = String::new();
    let mut used = 0usize;
    for (i, seg) in segments.iter().enumerate() {
        let segw = UnicodeWidthStr::width(seg.as_str());
        let addw = segw
            + if i == 0 {
                0
            } else {
                UnicodeWidthStr::width(sep)
            };
        if used + addw > max_width as usize {
            break;
        }
        if i > 0 {
            out.push_str(sep);
            used += UnicodeWidthStr::width(sep);
        }
        out.push_str(seg);
        used += segw;
    }
    out
}
