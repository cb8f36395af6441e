use std::sync::Arc;
use tokio::sync::watch;

/// Change notification for views: a revision number bumped on every committed mutation.
#[derive(Clone)]
pub struct StateNotifier {
    sender: Arc<watch::Sender<u64>>,
}

impl StateNotifier {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn notify(&self) {
        self.sender.send_modify(|revision| *revision += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl Default for StateNotifier {
    fn default() -> Self {
        Self::new()
    }
}
