use crate::sys::protocol::Command;
use async_channel::Sender;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A control command; the status line goes back on `reply`.
    Command {
        command: Command,
        reply: Sender<String>,
    },
    ConfigReload,
}
