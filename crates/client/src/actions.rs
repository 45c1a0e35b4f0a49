use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use ember_core::chat::CommandDispatcher;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

/// One slash command. `params` holds up to `maximum_parameters()` leading
/// tokens; whatever follows arrives untokenized as `remainder`.
pub trait SlashAction {
    fn execute(
        &self,
        session: &Session,
        params: &[&str],
        remainder: &str,
    ) -> Result<(), ActionError>;

    fn minimum_parameters(&self) -> usize {
        0
    }

    fn maximum_parameters(&self) -> usize {
        0
    }
}

struct WhoAction;

impl SlashAction for WhoAction {
    fn execute(&self, session: &Session, _: &[&str], _: &str) -> Result<(), ActionError> {
        session.action("who", Vec::new());
        Ok(())
    }
}

struct EmoteAction;

impl SlashAction for EmoteAction {
    fn execute(&self, session: &Session, _: &[&str], remainder: &str) -> Result<(), ActionError> {
        if remainder.is_empty() {
            return Err(ActionError::MissingArgument("text"));
        }
        session.action("emote", vec![remainder.to_string()]);
        Ok(())
    }
}

struct TellAction;

impl SlashAction for TellAction {
    fn execute(
        &self,
        session: &Session,
        params: &[&str],
        remainder: &str,
    ) -> Result<(), ActionError> {
        let target = params.first().copied().unwrap_or("");
        if remainder.is_empty() {
            return Err(ActionError::MissingArgument("message"));
        }
        session.action("tell", vec![target.to_string(), remainder.to_string()]);
        Ok(())
    }

    fn minimum_parameters(&self) -> usize {
        1
    }

    fn maximum_parameters(&self) -> usize {
        1
    }
}

struct ChallengeAction;

impl SlashAction for ChallengeAction {
    fn execute(&self, session: &Session, params: &[&str], _: &str) -> Result<(), ActionError> {
        let target = params.first().copied().unwrap_or("");
        session.action("challenge", vec!["open".to_string(), target.to_string()]);
        Ok(())
    }

    fn minimum_parameters(&self) -> usize {
        1
    }

    fn maximum_parameters(&self) -> usize {
        1
    }
}

/// Slash command registry. A line without a leading `/` is a chat message and
/// goes to the session directly; unknown commands and arity violations are
/// reported unhandled so the input does not remember them.
pub struct ActionRepo {
    session: Session,
    actions: HashMap<&'static str, Box<dyn SlashAction>>,
}

impl ActionRepo {
    pub fn new(session: Session) -> Self {
        let mut actions: HashMap<&'static str, Box<dyn SlashAction>> = HashMap::new();
        actions.insert("who", Box::new(WhoAction));
        actions.insert("me", Box::new(EmoteAction));
        actions.insert("emote", Box::new(EmoteAction));
        actions.insert("tell", Box::new(TellAction));
        actions.insert("msg", Box::new(TellAction));
        actions.insert("challenge", Box::new(ChallengeAction));
        Self { session, actions }
    }

    pub fn known(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }
}

impl CommandDispatcher for ActionRepo {
    fn execute(&mut self, raw: &str) -> bool {
        if raw.is_empty() {
            return false;
        }
        let Some(rest) = raw.strip_prefix('/') else {
            self.session.chat(raw);
            return true;
        };
        let (name, tail) = match rest.find(' ') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };
        let name = name.to_lowercase();
        let Some(action) = self.actions.get(name.as_str()) else {
            debug!(target: "client", command = %name, "unknown slash command");
            return false;
        };
        let (params, remainder) = split_params(tail, action.maximum_parameters());
        if params.len() < action.minimum_parameters() {
            warn!(target: "client", command = %name, "missing arguments");
            return false;
        }
        match action.execute(&self.session, &params, remainder) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "client", command = %name, %err, "slash command failed");
                false
            }
        }
    }
}

// Split into up to `max` leading tokens plus the untokenized tail.
fn split_params(mut rest: &str, max: usize) -> (Vec<&str>, &str) {
    let mut params = Vec::new();
    for _ in 0..max {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }
        match rest.find(' ') {
            Some(pos) => {
                params.push(&rest[..pos]);
                rest = &rest[pos + 1..];
            }
            None => {
                params.push(rest);
                rest = "";
            }
        }
    }
    (params, rest.trim_start_matches(' '))
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Receiver;

    use super::*;
    use crate::session::ClientCommand;

    fn repo() -> (ActionRepo, Receiver<ClientCommand>) {
        let (session, rx) = Session::pair();
        (ActionRepo::new(session), rx)
    }

    #[test]
    fn plain_text_is_sent_as_chat() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("good morning"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Chat("good morning".into())
        );
    }

    #[test]
    fn empty_line_is_not_handled() {
        let (mut repo, rx) = repo();
        assert!(!repo.execute(""));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn who_takes_no_arguments() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/who"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Action {
                name: "who".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/WHO"));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn tell_splits_target_from_message() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/tell bob meet me at the tavern"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Action {
                name: "tell".into(),
                args: vec!["bob".into(), "meet me at the tavern".into()],
            }
        );
    }

    #[test]
    fn msg_is_an_alias_for_tell() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/msg bob hi"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Action {
                name: "tell".into(),
                args: vec!["bob".into(), "hi".into()],
            }
        );
    }

    #[test]
    fn tell_without_message_is_rejected() {
        let (mut repo, rx) = repo();
        assert!(!repo.execute("/tell bob"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn tell_without_any_arguments_is_rejected() {
        let (mut repo, rx) = repo();
        assert!(!repo.execute("/tell"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn emote_forwards_the_whole_remainder() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/me waves to everyone"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Action {
                name: "emote".into(),
                args: vec!["waves to everyone".into()],
            }
        );
    }

    #[test]
    fn challenge_opens_against_the_target() {
        let (mut repo, rx) = repo();
        assert!(repo.execute("/challenge bob"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientCommand::Action {
                name: "challenge".into(),
                args: vec!["open".into(), "bob".into()],
            }
        );
    }

    #[test]
    fn unknown_commands_are_not_handled() {
        let (mut repo, rx) = repo();
        assert!(!repo.execute("/dance"));
        assert!(rx.try_recv().is_err());
        assert!(repo.known("who"));
        assert!(!repo.known("dance"));
    }

    #[test]
    fn split_params_keeps_the_tail_untokenized() {
        assert_eq!(split_params("a b c d", 2), (vec!["a", "b"], "c d"));
        assert_eq!(split_params("  a   b  ", 1), (vec!["a"], "b  "));
        assert_eq!(split_params("", 2), (vec![], ""));
        assert_eq!(split_params("a b", 0), (vec![], "a b"));
    }
}
