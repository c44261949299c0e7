/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Model::init`](crate::Model::init).
///
/// Commands describe work for the runtime: deliver a message right away or
/// stop the program. `update` itself never blocks; everything that takes time
/// goes through a [`Subscription`](crate::Subscription).
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let cmd = Command::none();
///
/// // Tell a parent that something happened:
/// let cmd = Command::message(Msg::TopicSelected(topic));
///
/// // Quit the program:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Send a message on the next loop iteration.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Quit,
        }
    }

    /// Transform the message type (for embedding a sub-model in a parent).
    pub fn map<NewMsg: Send + 'static>(self, f: impl FnOnce(Msg) -> NewMsg) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Message(msg) => Command::message(f(msg)),
            CommandInner::Quit => Command::quit(),
        }
    }

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command stops the program.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// The message this command delivers, if any.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            CommandInner::None | CommandInner::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
        assert!(!cmd.is_quit());
        assert_eq!(cmd.into_message(), None);
    }

    #[test]
    fn command_message_is_delivered() {
        let cmd: Command<i32> = Command::message(42);
        assert!(!cmd.is_none());
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_quit_is_quit() {
        let cmd: Command<()> = Command::quit();
        assert!(cmd.is_quit());
    }

    #[test]
    fn map_rewrites_messages_and_keeps_quit() {
        let mapped: Command<String> = Command::message(7).map(|n: i32| n.to_string());
        assert_eq!(mapped.into_message(), Some("7".to_string()));

        let quit: Command<String> = Command::<i32>::quit().map(|n| n.to_string());
        assert!(quit.is_quit());

        let none: Command<String> = Command::<i32>::none().map(|n| n.to_string());
        assert!(none.is_none());
    }
}
