use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::info;

use client::actions::ActionRepo;
use client::session::{ClientCommand, Session};
use ember_core::chat::ChatInput;

use crate::keys;
use crate::persist::{self, FileConfig};
use crate::strings;

pub mod transcript;

// Oldest game-log entries are dropped past this.
pub const TRANSCRIPT_LIMIT: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Chat,
    Server,
    Client,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub text: String,
}

impl Entry {
    pub fn chat<S: Into<String>>(s: S) -> Self {
        Self {
            kind: EntryKind::Chat,
            text: s.into(),
        }
    }
    pub fn server<S: Into<String>>(s: S) -> Self {
        Self {
            kind: EntryKind::Server,
            text: s.into(),
        }
    }
    pub fn client<S: Into<String>>(s: S) -> Self {
        Self {
            kind: EntryKind::Client,
            text: s.into(),
        }
    }
}

pub struct App {
    pub transcript: Vec<Entry>,
    pub chat: ChatInput,
    pub character: Option<String>,
    pub should_quit: bool,
    pub dirty: bool,
    pub log_scroll: u16,
    pub stick_to_bottom: bool,
    pub log_viewport: u16,
    pub wrap_width: u16,
    pub wrap_cache: Vec<transcript::WrappedEntry>,
    pub total_lines: usize,
    cmd_rx: Receiver<ClientCommand>,
}

impl App {
    pub fn new() -> Self {
        let config = FileConfig::load();
        let (session, cmd_rx) = Session::pair();
        let repo = ActionRepo::new(session.clone());
        let chat = ChatInput::new(Box::new(config), Box::new(repo), Box::new(session));
        let mut transcript = persist::load_transcript().unwrap_or_default();
        if transcript.is_empty() {
            transcript.push(Entry::server(strings::WELCOME));
        }
        Self {
            transcript,
            chat,
            character: None,
            should_quit: false,
            dirty: true,
            log_scroll: 0,
            stick_to_bottom: true,
            log_viewport: 0,
            wrap_width: 0,
            wrap_cache: Vec::new(),
            total_lines: 0,
            cmd_rx,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if !matches!(key.kind, KeyEventKind::Press) {
            return;
        }
        // Let the chat input consume the event first: shift+arrow scrollback
        // navigation, then Enter submission.
        if let Some(k) = keys::extract_key(&key) {
            if self.chat.on_key_down(k, keys::shift_held(&key)) {
                self.dirty = true;
                return;
            }
            if self.chat.on_key_press(k) {
                info!(target: "tui", "line submitted");
                self.stick_to_bottom = true;
                self.log_scroll = 0;
                self.dirty = true;
                return;
            }
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Backspace => self.chat.delete_left_grapheme(),
            KeyCode::Delete => self.chat.delete_right_grapheme(),
            KeyCode::Char('w') if ctrl => self.chat.delete_prev_word(),
            KeyCode::Char('u') if ctrl => self.chat.kill_to_start(),
            KeyCode::Char('k') if ctrl => self.chat.kill_to_end(),
            KeyCode::Char('a') if ctrl => self.chat.move_cursor_start(),
            KeyCode::Char('e') if ctrl => self.chat.move_cursor_end(),
            KeyCode::Char(ch) if !ctrl => {
                let mut buf = [0u8; 4];
                self.chat.insert_text(ch.encode_utf8(&mut buf));
            }
            KeyCode::Left if ctrl => self.chat.move_cursor_word_left(),
            KeyCode::Right if ctrl => self.chat.move_cursor_word_right(),
            KeyCode::Left => self.chat.move_cursor_left(),
            KeyCode::Right => self.chat.move_cursor_right(),
            KeyCode::Home if ctrl => {
                self.log_scroll = u16::MAX;
                self.stick_to_bottom = false;
            }
            KeyCode::End if ctrl => {
                self.log_scroll = 0;
                self.stick_to_bottom = true;
            }
            KeyCode::Home => self.chat.move_cursor_start(),
            KeyCode::End => self.chat.move_cursor_end(),
            KeyCode::PageUp => {
                let step = self.log_viewport.max(1);
                self.log_scroll = self.log_scroll.saturating_add(step);
                self.stick_to_bottom = false;
            }
            KeyCode::PageDown => {
                let step = self.log_viewport.max(1);
                self.log_scroll = self.log_scroll.saturating_sub(step);
                if self.log_scroll == 0 {
                    self.stick_to_bottom = true;
                }
            }
            KeyCode::Up if ctrl => {
                self.log_scroll = self.log_scroll.saturating_add(1);
                self.stick_to_bottom = false;
            }
            KeyCode::Down if ctrl => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
                if self.log_scroll == 0 {
                    self.stick_to_bottom = true;
                }
            }
            _ => {}
        }
        self.dirty = true;
    }

    /// Drain outbound commands into the game log. A connected client would
    /// hand these to the wire; the local loop echoes them instead.
    pub fn on_tick(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            let entry = render_command(&cmd, self.character.as_deref());
            match cmd {
                ClientCommand::ChooseCharacter(name) => {
                    self.character = (!name.is_empty()).then_some(name);
                }
                ClientCommand::Close => self.should_quit = true,
                _ => {}
            }
            self.push_entry(entry);
            self.stick_to_bottom = true;
            self.dirty = true;
        }
    }

    pub fn push_entry(&mut self, entry: Entry) {
        self.transcript.push(entry);
        if self.transcript.len() > TRANSCRIPT_LIMIT {
            let excess = self.transcript.len() - TRANSCRIPT_LIMIT;
            self.transcript.drain(..excess);
            // cache indexes shifted; force a rebuild on the next draw
            self.wrap_width = 0;
        }
    }
}

fn render_command(cmd: &ClientCommand, character: Option<&str>) -> Entry {
    match cmd {
        ClientCommand::Chat(text) => {
            let speaker = character.unwrap_or("you");
            Entry::chat(format!("<{speaker}> {text}"))
        }
        ClientCommand::Action { name, args } => {
            if args.is_empty() {
                Entry::client(format!("sent {name}"))
            } else {
                Entry::client(format!("sent {name} {}", args.join(" ")))
            }
        }
        ClientCommand::ChooseCharacter(name) => {
            Entry::server(format!("entering the world as {name}"))
        }
        ClientCommand::Close => Entry::client("connection closed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_lines_carry_the_active_character() {
        assert_eq!(
            render_command(&ClientCommand::Chat("hello".into()), None),
            Entry::chat("<you> hello")
        );
        assert_eq!(
            render_command(&ClientCommand::Chat("hello".into()), Some("bob")),
            Entry::chat("<bob> hello")
        );
    }

    #[test]
    fn actions_render_with_their_arguments() {
        assert_eq!(
            render_command(
                &ClientCommand::Action {
                    name: "who".into(),
                    args: vec![],
                },
                None
            ),
            Entry::client("sent who")
        );
        assert_eq!(
            render_command(
                &ClientCommand::Action {
                    name: "tell".into(),
                    args: vec!["bob".into(), "hi".into()],
                },
                None
            ),
            Entry::client("sent tell bob hi")
        );
    }

    #[test]
    fn control_commands_render_as_notices() {
        assert_eq!(
            render_command(&ClientCommand::ChooseCharacter("bob".into()), None),
            Entry::server("entering the world as bob")
        );
        assert_eq!(
            render_command(&ClientCommand::Close, Some("bob")),
            Entry::client("connection closed")
        );
    }
}
