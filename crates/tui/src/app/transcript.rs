use textwrap::{wrap, Options};
use unicode_width::UnicodeWidthStr;

use crate::strings::entry_prefix;

use super::{App, Entry, EntryKind};

#[derive(Clone)]
pub struct WrappedEntry {
    pub kind: EntryKind,
    pub lines: Vec<String>,
}

impl App {
    // Rebuild the wrap cache when the width or the entry count changed.
    // Entries are immutable once pushed, so nothing else can invalidate it
    // (eviction resets wrap_width to force a pass through here).
    pub fn ensure_wrapped(&mut self, width: u16) {
        let width = width.max(1);
        if self.wrap_width == width && self.wrap_cache.len() == self.transcript.len() {
            return;
        }
        self.wrap_cache.clear();
        for entry in &self.transcript {
            self.wrap_cache.push(wrap_entry(entry, width));
        }
        self.total_lines = self.wrap_cache.iter().map(|w| w.lines.len()).sum();
        self.wrap_width = width;
    }
}

pub(crate) fn wrap_entry(entry: &Entry, width: u16) -> WrappedEntry {
    let prefix = entry_prefix(entry.kind);
    let full = format!("{}{}", prefix, entry.text);
    let indent = " ".repeat(UnicodeWidthStr::width(prefix));
    let opts = Options::new(width as usize).subsequent_indent(&indent);
    let lines = wrap(&full, opts)
        .into_iter()
        .map(|c| c.into_owned())
        .collect::<Vec<_>>();
    WrappedEntry {
        kind: entry.kind,
        lines,
    }
}
