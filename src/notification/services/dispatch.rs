//! Post-commit dispatcher for notification side effects.

use crate::notification::{
    domain::{Notification, NotificationRequest},
    ports::NotificationRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Executes the side-effect list a task mutation produced after the task
/// record has committed.
///
/// Delivery is best-effort: an enqueue failure is logged and swallowed so
/// it can never abort or roll back the triggering mutation. The sink is
/// independently observable, so missed notifications are recoverable
/// outside this core.
#[derive(Clone)]
pub struct NotificationDispatcher<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    sink: Arc<N>,
    clock: Arc<C>,
}

impl<N, C> NotificationDispatcher<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over a notification sink.
    #[must_use]
    pub const fn new(sink: Arc<N>, clock: Arc<C>) -> Self {
        Self { sink, clock }
    }

    /// Enqueues every pending notification, logging and swallowing
    /// failures.
    pub async fn dispatch(&self, requests: Vec<NotificationRequest>) {
        for request in requests {
            let notification = Notification::new(request, &*self.clock);
            if let Err(err) = self.sink.append(&notification).await {
                tracing::warn!(
                    notification_id = %notification.id(),
                    user_id = %notification.user_id(),
                    task_id = %notification.task_id(),
                    error = %err,
                    "failed to enqueue notification",
                );
            }
        }
    }
}
