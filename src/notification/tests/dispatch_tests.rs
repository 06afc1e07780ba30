//! Dispatcher tests: durable enqueue on success and swallowed failures.

use std::sync::Arc;

use crate::notification::{
    adapters::memory::InMemoryNotificationRepository,
    domain::{Notification, NotificationId, NotificationRequest},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
    services::NotificationDispatcher,
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;

mockall::mock! {
    NotificationSink {}

    #[async_trait]
    impl NotificationRepository for NotificationSink {
        async fn append(&self, notification: &Notification) -> NotificationRepositoryResult<()>;
        async fn find_by_id(
            &self,
            id: NotificationId,
        ) -> NotificationRepositoryResult<Option<Notification>>;
        async fn list_for_user(&self, user: UserId) -> NotificationRepositoryResult<Vec<Notification>>;
        async fn mark_read(&self, id: NotificationId) -> NotificationRepositoryResult<Notification>;
        async fn mark_all_read(&self, user: UserId) -> NotificationRepositoryResult<u64>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_enqueues_unread_records() {
    let sink = Arc::new(InMemoryNotificationRepository::new());
    let dispatcher = NotificationDispatcher::new(Arc::clone(&sink), Arc::new(DefaultClock));

    let target = UserId::new();
    let request = NotificationRequest::task_completed(target, TaskId::new(), "Wrap up");
    dispatcher.dispatch(vec![request]).await;

    let inbox = sink.list_for_user(target).await.expect("in-memory inbox");
    assert_eq!(inbox.len(), 1);
    assert!(inbox.iter().all(|notification| !notification.is_read()));
    assert!(inbox.iter().all(|notification| {
        notification.message() == "Task \"Wrap up\" has been marked as completed"
    }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_swallows_sink_failures() {
    let mut sink = MockNotificationSink::new();
    sink.expect_append().times(2).returning(|_| {
        Err(NotificationRepositoryError::persistence(
            std::io::Error::other("sink unavailable"),
        ))
    });

    let dispatcher = NotificationDispatcher::new(Arc::new(sink), Arc::new(DefaultClock));
    let task = TaskId::new();
    let requests = vec![
        NotificationRequest::assigned_to_task(UserId::new(), task, "Resilient"),
        NotificationRequest::assigned_to_task(UserId::new(), task, "Resilient"),
    ];

    // Must not panic or abort on failures; both appends are attempted.
    dispatcher.dispatch(requests).await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_continues_past_a_failing_request() {
    let mut sink = MockNotificationSink::new();
    let mut sequence = mockall::Sequence::new();
    sink.expect_append()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| {
            Err(NotificationRepositoryError::persistence(
                std::io::Error::other("transient failure"),
            ))
        });
    sink.expect_append()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(()));

    let dispatcher = NotificationDispatcher::new(Arc::new(sink), Arc::new(DefaultClock));
    let task = TaskId::new();
    dispatcher
        .dispatch(vec![
            NotificationRequest::assigned_to_new_task(UserId::new(), task, "First"),
            NotificationRequest::assigned_to_new_task(UserId::new(), task, "Second"),
        ])
        .await;
}
