use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{info, warn};

use ember_core::chat::SessionHandle;

/// Requests the UI hands to the connection layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// A plain chat line spoken by the player.
    Chat(String),
    /// A game action produced by a slash command, e.g. `who` or `tell`.
    Action { name: String, args: Vec<String> },
    ChooseCharacter(String),
    Close,
}

/// Cheap-clone handle to the connection layer. Sends are fire-and-forget;
/// a dropped receiver means the connection is gone and is only logged.
#[derive(Clone)]
pub struct Session {
    tx: Sender<ClientCommand>,
}

impl Session {
    /// Handle plus the receiving half the connection layer drains.
    pub fn pair() -> (Session, Receiver<ClientCommand>) {
        let (tx, rx) = channel();
        (Session { tx }, rx)
    }

    pub fn send(&self, cmd: ClientCommand) {
        if self.tx.send(cmd).is_err() {
            warn!(target: "client", "connection receiver dropped, command discarded");
        }
    }

    pub fn chat(&self, text: &str) {
        self.send(ClientCommand::Chat(text.to_string()));
    }

    pub fn action(&self, name: &str, args: Vec<String>) {
        self.send(ClientCommand::Action {
            name: name.to_string(),
            args,
        });
    }
}

impl SessionHandle for Session {
    fn choose_character(&mut self, name: &str) {
        info!(target: "client", name, "choose character");
        self.send(ClientCommand::ChooseCharacter(name.to_string()));
    }

    fn close(&mut self) {
        info!(target: "client", "close");
        self.send(ClientCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_order() {
        let (mut session, rx) = Session::pair();
        session.chat("hello");
        session.choose_character("bob");
        session.close();
        assert_eq!(rx.recv().unwrap(), ClientCommand::Chat("hello".into()));
        assert_eq!(
            rx.recv().unwrap(),
            ClientCommand::ChooseCharacter("bob".into())
        );
        assert_eq!(rx.recv().unwrap(), ClientCommand::Close);
    }

    #[test]
    fn send_after_receiver_drop_does_not_panic() {
        let (session, rx) = Session::pair();
        drop(rx);
        session.chat("anyone there?");
    }
}
