//! Marshaling from any thread onto the UI thread.
//!
//! Producers hold a [`UiDispatcher`]; the UI loop owns the single [`UiQueue`]
//! and is the only place commands take effect. Commands run in the order they
//! were posted.

use async_channel::{Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

/// Window-state mutations that may be requested from outside the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Show,
    Hide,
    Quit,
}

/// Thread-safe handle for scheduling a [`UiCommand`] on the UI thread.
#[derive(Debug, Clone)]
pub struct UiDispatcher {
    tx: Sender<UiCommand>,
}

impl UiDispatcher {
    /// Schedule `command` for the next time the UI loop is idle.
    ///
    /// Never blocks. A command posted after the UI loop has gone away is dropped.
    pub fn post(&self, command: UiCommand) {
        match self.tx.try_send(command) {
            Ok(()) => debug!("Posted {:?} to UI thread", command),
            Err(e) => warn!("Dropped {:?}: UI queue closed ({})", command, e),
        }
    }
}

/// UI-thread end of the dispatch channel.
#[derive(Debug)]
pub struct UiQueue {
    rx: Receiver<UiCommand>,
}

impl UiQueue {
    /// Wait for the next command. `None` once every dispatcher is gone.
    pub async fn next(&self) -> Option<UiCommand> {
        self.rx.recv().await.ok()
    }

    /// Take the next pending command without waiting.
    #[cfg(test)]
    pub fn try_next(&self) -> Option<UiCommand> {
        match self.rx.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty | TryRecvError::Closed) => None,
        }
    }
}

/// Create a connected dispatcher/queue pair.
pub fn ui_channel() -> (UiDispatcher, UiQueue) {
    let (tx, rx) = async_channel::unbounded();
    (UiDispatcher { tx }, UiQueue { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_post_order() {
        let (dispatcher, queue) = ui_channel();
        dispatcher.post(UiCommand::Show);
        dispatcher.post(UiCommand::Hide);
        dispatcher.post(UiCommand::Show);

        let received: Vec<_> = std::iter::from_fn(|| queue.try_next()).collect();
        assert_eq!(
            received,
            vec![UiCommand::Show, UiCommand::Hide, UiCommand::Show]
        );
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn test_post_after_queue_dropped_is_silent() {
        let (dispatcher, queue) = ui_channel();
        drop(queue);
        dispatcher.post(UiCommand::Quit);
    }

    #[test]
    fn test_posts_from_other_thread_arrive() {
        let (dispatcher, queue) = ui_channel();
        let remote = dispatcher.clone();
        std::thread::spawn(move || remote.post(UiCommand::Show))
            .join()
            .unwrap();

        assert_eq!(queue.try_next(), Some(UiCommand::Show));
    }
}
