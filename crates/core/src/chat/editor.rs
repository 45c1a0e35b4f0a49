use unicode_segmentation::UnicodeSegmentation;

use super::ChatInput;

// Grapheme-cluster line editing. The buffer is a single line; the cursor
// counts grapheme clusters, not bytes.
impl ChatInput {
    pub(crate) fn set_buffer_end(&mut self, text: String) {
        self.cursor = text.graphemes(true).count();
        self.buffer = text;
    }

    pub fn insert_text(&mut self, s: &str) {
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let idx = self.cursor.min(parts.len());
        let mut next = String::new();
        for g in &parts[..idx] {
            next.push_str(g);
        }
        next.push_str(s);
        for g in &parts[idx..] {
            next.push_str(g);
        }
        self.buffer = next;
        let added = s.graphemes(true).count();
        self.cursor = (idx + added).min(self.buffer.graphemes(true).count());
    }

    pub fn delete_left_grapheme(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let idx = self.cursor.min(parts.len());
        parts.remove(idx - 1);
        self.buffer = parts.concat();
        self.cursor = idx - 1;
    }

    pub fn delete_right_grapheme(&mut self) {
        let mut parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let idx = self.cursor.min(parts.len());
        if idx < parts.len() {
            parts.remove(idx);
            self.buffer = parts.concat();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.buffer.graphemes(true).count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.buffer.graphemes(true).count();
    }

    pub fn move_cursor_word_left(&mut self) {
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let mut i = self.cursor.min(parts.len());
        while i > 0 && parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        while i > 0 && !parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        self.cursor = i;
    }

    pub fn move_cursor_word_right(&mut self) {
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let mut i = self.cursor.min(parts.len());
        while i < parts.len() && parts[i].trim().is_empty() {
            i += 1;
        }
        while i < parts.len() && !parts[i].trim().is_empty() {
            i += 1;
        }
        self.cursor = i;
    }

    pub fn delete_prev_word(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let mut i = self.cursor.min(parts.len());
        while i > 0 && parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        while i > 0 && !parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        let mut next = parts.clone();
        next.drain(i..self.cursor.min(parts.len()));
        self.buffer = next.concat();
        self.cursor = i;
    }

    pub fn kill_to_start(&mut self) {
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let idx = self.cursor.min(parts.len());
        self.buffer = parts[idx..].concat();
        self.cursor = 0;
    }

    pub fn kill_to_end(&mut self) {
        let parts: Vec<&str> = self.buffer.graphemes(true).collect();
        let idx = self.cursor.min(parts.len());
        self.buffer = parts[..idx].concat();
    }
}
