use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A spawned callback that is aborted when dropped.
///
/// Replacing or clearing the slot that owns it cancels the callback.
#[derive(Debug)]
pub(crate) struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    pub(crate) fn spawn<F>(runtime: &Handle, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: Some(runtime.spawn(task)),
        }
    }

    /// Release the handle without aborting. Used by a task clearing its own slot.
    pub(crate) fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_the_callback() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = ScheduledTask::spawn(&Handle::current(), async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(task);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn detached_callback_still_runs() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let task = ScheduledTask::spawn(&Handle::current(), async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
        });
        task.detach();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(fired.load(Ordering::SeqCst));
    }
}
