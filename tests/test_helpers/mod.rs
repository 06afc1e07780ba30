//! Shared wiring for behavioural integration tests: an in-memory stack
//! assembled through the crate's public API.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use taskhub::notification::adapters::memory::InMemoryNotificationRepository;
use taskhub::notification::services::{NotificationDispatcher, NotificationService};
use taskhub::task::adapters::memory::InMemoryTaskRepository;
use taskhub::task::services::{
    CreateTaskRequest, LeaderboardService, TaskLifecycleService,
};
use taskhub::user::adapters::memory::InMemoryUserRepository;
use taskhub::user::domain::{AuthContext, Caller, Role, User, UserId};

pub type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryNotificationRepository,
    DefaultClock,
>;
pub type Leaderboard = LeaderboardService<InMemoryTaskRepository, InMemoryUserRepository>;
pub type Inbox = NotificationService<InMemoryNotificationRepository>;

/// The full in-memory application stack.
pub struct App {
    pub lifecycle: Lifecycle,
    pub leaderboard: Leaderboard,
    pub inbox: Inbox,
    pub users: Arc<InMemoryUserRepository>,
}

impl App {
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let clock = Arc::new(DefaultClock);
        let dispatcher =
            NotificationDispatcher::new(Arc::clone(&notifications), Arc::clone(&clock));

        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                dispatcher,
                clock,
            ),
            leaderboard: LeaderboardService::new(tasks, Arc::clone(&users)),
            inbox: NotificationService::new(notifications),
            users,
        }
    }

    /// Registers a user and returns their identifier with an
    /// authenticated context.
    pub fn register(&self, username: &str, role: Role) -> (UserId, AuthContext) {
        let id = UserId::new();
        let email = format!("{username}@example.com");
        self.users
            .add(User::new(id, username, email, role))
            .expect("in-memory user insert");
        (id, AuthContext::authenticated(Caller::new(id, role)))
    }
}

/// A due date `offset_days` from a fixed reference instant.
pub fn due_in(offset_days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::days(offset_days)
}

/// A create request with valid defaults.
pub fn create_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title, "Integration fixture body", due_in(7))
}
