use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use super::{DeferredTaskRunner, ReminderRequest, ReminderTag, ReminderWorker};

struct PendingTask {
    request_id: Uuid,
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl PendingTask {
    fn is_live(&self) -> bool {
        !self.token.is_cancelled() && !self.join.is_finished()
    }
}

/// Deferred task runner backed by tokio tasks.
///
/// Each request becomes one task that sleeps until `fire_at` and then calls
/// the [`ReminderWorker`], unless its cancellation token fires first. The
/// tag map is owned by the runner, so the owning scheduler needs `&mut`
/// access and no locking is involved. Dropping the runner does not cancel
/// tasks that were already handed off.
pub struct TokioTaskRunner {
    handle: Handle,
    worker: Arc<ReminderWorker>,
    tasks: HashMap<ReminderTag, PendingTask>,
}

impl TokioTaskRunner {
    pub fn new(handle: Handle, worker: ReminderWorker) -> Self {
        Self {
            handle,
            worker: Arc::new(worker),
            tasks: HashMap::new(),
        }
    }

    /// Id of the live task under `tag`, if any.
    pub fn pending_request(&self, tag: ReminderTag) -> Option<Uuid> {
        self.tasks
            .get(&tag)
            .filter(|task| task.is_live())
            .map(|task| task.request_id)
    }
}

impl DeferredTaskRunner for TokioTaskRunner {
    fn enqueue(&mut self, request: ReminderRequest) {
        let delay = request.delay_from(Utc::now());
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let worker = Arc::clone(&self.worker);
        let request_id = request.id;
        let tag = request.tag;

        let join = self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!(%tag, "deferred task cancelled before firing");
                }
                _ = tokio::time::sleep(delay) => {
                    worker.fire(&request);
                }
            }
        });

        // A stale entry (already fired) is simply overwritten.
        self.tasks.insert(
            tag,
            PendingTask {
                request_id,
                token,
                join,
            },
        );
    }

    fn cancel(&mut self, tag: ReminderTag) -> bool {
        match self.tasks.remove(&tag) {
            Some(task) if task.is_live() => {
                task.token.cancel();
                true
            }
            _ => false,
        }
    }

    fn is_pending(&self, tag: ReminderTag) -> bool {
        self.pending_request(tag).is_some()
    }
}
