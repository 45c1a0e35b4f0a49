use tracing::debug;

use crate::config::{self, ConfigStore};

pub mod editor;
pub mod history;

/// Scrollback keeps at most this many submitted lines; the oldest entry is
/// evicted first.
pub const HISTORY_LIMIT: usize = 100;

/// Normalized key codes the chat input reacts to. The UI toolkit maps its raw
/// key events onto these before calling in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
}

/// Interprets a submitted line. Returns true when the line was recognized and
/// should be remembered in the scrollback.
pub trait CommandDispatcher {
    fn execute(&mut self, raw: &str) -> bool;
}

/// Connection-level controls the input drives directly.
pub trait SessionHandle {
    fn choose_character(&mut self, name: &str);
    fn close(&mut self);
}

/// Chat entry field: a line buffer with a grapheme cursor plus a bounded
/// scrollback of submitted lines. Collaborators are injected at construction;
/// the component never touches a widget or the filesystem itself.
pub struct ChatInput {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: usize,
    persist_on_submit: bool,
    wants_focus: bool,
    config: Box<dyn ConfigStore>,
    dispatcher: Box<dyn CommandDispatcher>,
    session: Box<dyn SessionHandle>,
}

impl ChatInput {
    pub fn new(
        config: Box<dyn ConfigStore>,
        dispatcher: Box<dyn CommandDispatcher>,
        session: Box<dyn SessionHandle>,
    ) -> Self {
        // restore scrollback from the previous session
        let mut history = config::get_string_list(&*config, config::KEY_HISTORY);
        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }
        let history_index =
            config::get_usize(&*config, config::KEY_HISTORY_INDEX, 0).min(history.len());
        let persist_on_submit = config::get_bool(&*config, config::KEY_HISTORY_PERSIST, true);
        Self {
            buffer: String::new(),
            cursor: 0,
            history,
            history_index,
            persist_on_submit,
            wants_focus: false,
            config,
            dispatcher,
            session,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Overwrite the buffer and request input focus, e.g. after a completion
    /// or mention insertion picked by the user elsewhere in the UI.
    pub fn set_text(&mut self, text: &str) {
        self.set_buffer_end(text.to_string());
        self.wants_focus = true;
    }

    /// True once per `set_text` call; the UI drains this to move focus.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.wants_focus)
    }

    /// Modifier+arrow scrollback navigation. Returns true when the event was
    /// consumed and must not fall through to other key handling.
    pub fn on_key_down(&mut self, key: Key, shift: bool) -> bool {
        if !shift {
            return false;
        }
        match key {
            Key::Up => {
                self.from_history(-1);
                true
            }
            Key::Down => {
                self.from_history(1);
                true
            }
            _ => false,
        }
    }

    /// Enter submits the buffer. Returns true when the event was consumed.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        if key == Key::Enter {
            self.send();
            true
        } else {
            false
        }
    }

    /// Submit the current buffer. Two control commands are routed straight to
    /// the session; everything else goes through the dispatcher and is
    /// remembered only when the dispatcher accepted it. The buffer is cleared
    /// no matter which branch ran.
    pub fn send(&mut self) {
        let line = self.buffer.clone();
        let first = line.split(' ').next().unwrap_or("");
        if first == "/choosecharacter" {
            // argument passed through as-is; the session side validates
            let name = line.split(' ').nth(1).unwrap_or("");
            debug!(target: "chat", name, "choose character");
            self.session.choose_character(name);
        } else if line == "/close" {
            debug!(target: "chat", "close requested");
            self.session.close();
        } else if self.dispatcher.execute(&line) {
            self.remember(&line);
        }
        self.clear();
    }
}


#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::testing::{RecordingDispatcher, RecordingSession, SessionEvent};
    use super::{ChatInput, Key, HISTORY_LIMIT};
    use crate::config::{self, ConfigStore, MemoryConfig};

    struct Fixture {
        input: ChatInput,
        config: MemoryConfig,
        seen: Rc<RefCell<Vec<String>>>,
        events: Rc<RefCell<Vec<SessionEvent>>>,
    }

    fn fixture(accept: bool, config: MemoryConfig) -> Fixture {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let session = RecordingSession::default();
        let events = session.events.clone();
        let input = ChatInput::new(
            Box::new(config.clone()),
            Box::new(RecordingDispatcher {
                accept,
                seen: seen.clone(),
            }),
            Box::new(session),
        );
        Fixture {
            input,
            config,
            seen,
            events,
        }
    }

    fn submit(input: &mut ChatInput, line: &str) {
        input.set_text(line);
        input.send();
    }

    #[test]
    fn restores_history_and_clamps_index_at_construction() {
        let mut config = MemoryConfig::new();
        config.set(config::KEY_HISTORY, json!(["hi", "/who"]));
        config.set(config::KEY_HISTORY_INDEX, json!(17));
        let f = fixture(true, config);
        assert_eq!(f.input.history(), ["hi", "/who"]);
        assert_eq!(f.input.history_index(), 2);
        assert_eq!(f.input.text(), "");
    }

    #[test]
    fn over_long_restored_history_is_trimmed_from_the_front() {
        let stored: Vec<String> = (0..130).map(|i| format!("line {i}")).collect();
        let mut config = MemoryConfig::new();
        config.set(config::KEY_HISTORY, json!(stored));
        let f = fixture(true, config);
        assert_eq!(f.input.history().len(), HISTORY_LIMIT);
        assert_eq!(f.input.history()[0], "line 30");
    }

    #[test]
    fn accepted_line_is_remembered_and_persisted() {
        let mut f = fixture(true, MemoryConfig::new());
        submit(&mut f.input, "hello there");
        assert_eq!(*f.seen.borrow(), ["hello there"]);
        assert_eq!(f.input.history(), ["hello there"]);
        assert_eq!(f.input.history_index(), 1);
        assert_eq!(f.input.text(), "");
        assert_eq!(
            f.config.get(config::KEY_HISTORY),
            Some(json!(["hello there"]))
        );
        assert_eq!(f.config.get(config::KEY_HISTORY_INDEX), Some(json!(1)));
    }

    #[test]
    fn rejected_line_clears_buffer_but_leaves_history_alone() {
        let mut f = fixture(false, MemoryConfig::new());
        submit(&mut f.input, "mumble");
        assert_eq!(*f.seen.borrow(), ["mumble"]);
        assert!(f.input.history().is_empty());
        assert_eq!(f.input.history_index(), 0);
        assert_eq!(f.input.text(), "");
        assert_eq!(f.config.get(config::KEY_HISTORY), None);
    }

    #[test]
    fn close_goes_to_the_session_and_skips_dispatch() {
        let mut f = fixture(true, MemoryConfig::new());
        submit(&mut f.input, "/close");
        assert!(f.seen.borrow().is_empty());
        assert!(f.input.history().is_empty());
        assert_eq!(*f.events.borrow(), [SessionEvent::Closed]);
        assert_eq!(f.input.text(), "");
    }

    #[test]
    fn close_with_trailing_text_is_an_ordinary_line() {
        let mut f = fixture(true, MemoryConfig::new());
        submit(&mut f.input, "/close now");
        assert_eq!(*f.seen.borrow(), ["/close now"]);
        assert!(f.events.borrow().is_empty());
    }

    #[test]
    fn choose_character_forwards_the_second_token() {
        let mut f = fixture(true, MemoryConfig::new());
        submit(&mut f.input, "/choosecharacter bob");
        assert!(f.seen.borrow().is_empty());
        assert!(f.input.history().is_empty());
        assert_eq!(*f.events.borrow(), [SessionEvent::Chose("bob".into())]);
    }

    #[test]
    fn choose_character_without_argument_passes_an_empty_name() {
        let mut f = fixture(true, MemoryConfig::new());
        submit(&mut f.input, "/choosecharacter");
        assert_eq!(*f.events.borrow(), [SessionEvent::Chose(String::new())]);
    }

    #[test]
    fn history_never_grows_past_the_limit() {
        let mut f = fixture(true, MemoryConfig::new());
        for i in 0..150 {
            submit(&mut f.input, &format!("line {i}"));
        }
        assert_eq!(f.input.history().len(), HISTORY_LIMIT);
        assert_eq!(f.input.history()[0], "line 50");
        assert_eq!(f.input.history()[HISTORY_LIMIT - 1], "line 149");
        assert_eq!(f.input.history_index(), HISTORY_LIMIT);
    }

    #[test]
    fn shift_up_and_down_walk_the_scrollback() {
        let mut config = MemoryConfig::new();
        config.set(config::KEY_HISTORY, json!(["hi", "/who"]));
        config.set(config::KEY_HISTORY_INDEX, json!(2));
        let mut f = fixture(true, config);

        assert!(f.input.on_key_down(Key::Up, true));
        assert_eq!(f.input.text(), "/who");
        assert_eq!(f.input.history_index(), 1);

        assert!(f.input.on_key_down(Key::Up, true));
        assert_eq!(f.input.text(), "hi");
        assert_eq!(f.input.history_index(), 0);

        // already at the oldest entry: index and buffer stay put
        assert!(f.input.on_key_down(Key::Up, true));
        assert_eq!(f.input.text(), "hi");
        assert_eq!(f.input.history_index(), 0);

        assert!(f.input.on_key_down(Key::Down, true));
        assert_eq!(f.input.text(), "/who");
        assert_eq!(f.input.history_index(), 1);

        assert!(f.input.on_key_down(Key::Down, true));
        assert_eq!(f.input.text(), "");
        assert_eq!(f.input.history_index(), 2);

        // past the newest entry: parked on fresh input
        assert!(f.input.on_key_down(Key::Down, true));
        assert_eq!(f.input.text(), "");
        assert_eq!(f.input.history_index(), 2);
    }

    #[test]
    fn navigation_on_empty_history_clears_and_stays_in_bounds() {
        let mut f = fixture(true, MemoryConfig::new());
        f.input.set_text("draft");
        assert!(f.input.on_key_down(Key::Up, true));
        assert_eq!(f.input.text(), "");
        assert_eq!(f.input.history_index(), 0);
    }

    #[test]
    fn unshifted_arrows_are_not_consumed() {
        let mut f = fixture(true, MemoryConfig::new());
        assert!(!f.input.on_key_down(Key::Up, false));
        assert!(!f.input.on_key_down(Key::Down, false));
        assert!(!f.input.on_key_down(Key::Enter, true));
    }

    #[test]
    fn enter_submits_through_key_press() {
        let mut f = fixture(true, MemoryConfig::new());
        f.input.set_text("hello");
        assert!(f.input.on_key_press(Key::Enter));
        assert_eq!(f.input.text(), "");
        assert_eq!(f.input.history(), ["hello"]);
        assert!(!f.input.on_key_press(Key::Up));
    }

    #[test]
    fn persist_on_submit_can_be_turned_off() {
        let mut config = MemoryConfig::new();
        config.set(config::KEY_HISTORY_PERSIST, json!(false));
        let mut f = fixture(true, config);
        submit(&mut f.input, "hello");
        assert_eq!(f.input.history(), ["hello"]);
        assert_eq!(f.config.get(config::KEY_HISTORY), None);

        // teardown still writes the scrollback out
        f.input.flush_history();
        assert_eq!(f.config.get(config::KEY_HISTORY), Some(json!(["hello"])));
        assert_eq!(f.config.get(config::KEY_HISTORY_INDEX), Some(json!(1)));
    }

    #[test]
    fn set_text_raises_a_focus_request_once() {
        let mut f = fixture(true, MemoryConfig::new());
        f.input.set_text("@bob ");
        assert_eq!(f.input.text(), "@bob ");
        assert!(f.input.take_focus_request());
        assert!(!f.input.take_focus_request());
    }
}
