//! Shared fixtures for task module tests: an in-memory service harness
//! and builders for callers and task payloads.

use std::sync::Arc;

use crate::notification::adapters::memory::InMemoryNotificationRepository;
use crate::notification::services::NotificationDispatcher;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::services::{CreateTaskRequest, TaskLifecycleService};
use crate::user::adapters::memory::InMemoryUserRepository;
use crate::user::domain::{AuthContext, Caller, Role, User, UserId};
use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;

pub(super) type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryNotificationRepository,
    DefaultClock,
>;

/// Fully wired in-memory service plus handles to its stores, so tests
/// can seed users and inspect persisted notifications directly.
pub(super) struct Harness {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
}

impl Harness {
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let clock = Arc::new(DefaultClock);
        let dispatcher =
            NotificationDispatcher::new(Arc::clone(&notifications), Arc::clone(&clock));
        let service = TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&users),
            dispatcher,
            clock,
        );
        Self {
            service,
            tasks,
            users,
            notifications,
        }
    }

    /// Registers a user in the directory and returns their identifier
    /// with an authenticated context.
    pub fn register(&self, username: &str, role: Role) -> (UserId, AuthContext) {
        let id = UserId::new();
        let email = format!("{username}@example.com");
        self.users
            .add(User::new(id, username, email, role))
            .expect("in-memory user insert");
        (id, AuthContext::authenticated(Caller::new(id, role)))
    }
}

/// A fixed reference instant so date filters are deterministic.
pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// A due date `offset_days` from the fixed reference instant.
pub(super) fn due_in(offset_days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(offset_days)
}

/// A create request with valid defaults for tests that only care about
/// one aspect of the payload.
pub(super) fn create_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title, "Test task body", due_in(7))
}
