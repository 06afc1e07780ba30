//! Access scope and typed filter predicate for task queries.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use crate::user::domain::{Caller, UserId};
use chrono::{DateTime, Utc};

/// The set of tasks a caller is permitted to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Administrators see every task.
    Unrestricted,
    /// Regular callers see tasks where they are creator or assignee.
    Member(UserId),
}

impl Scope {
    /// Derives the scope for a caller from their role.
    #[must_use]
    pub const fn for_caller(caller: &Caller) -> Self {
        if caller.is_admin() {
            Self::Unrestricted
        } else {
            Self::Member(caller.id())
        }
    }

    /// Returns `true` when the task falls inside this scope.
    #[must_use]
    pub fn permits(&self, task: &Task) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Member(user) => task.created_by() == *user || task.is_assigned_to(*user),
        }
    }
}

/// Typed predicate combining access scope with caller filters.
///
/// Every field is resolved from an allow-listed parameter; the predicate
/// never carries raw caller strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPredicate {
    /// Access scope, AND'ed against all other filters.
    pub scope: Scope,
    /// Exact-match status filter.
    pub status: Option<TaskStatus>,
    /// Exact-match priority filter.
    pub priority: Option<TaskPriority>,
    /// Inclusive due-date upper bound.
    pub due_before: Option<DateTime<Utc>>,
    /// Inclusive due-date lower bound.
    pub due_after: Option<DateTime<Utc>>,
}

impl TaskPredicate {
    /// Creates a predicate matching everything inside `scope`.
    #[must_use]
    pub const fn for_scope(scope: Scope) -> Self {
        Self {
            scope,
            status: None,
            priority: None,
            due_before: None,
            due_after: None,
        }
    }

    /// Evaluates the predicate against a task record.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.scope.permits(task)
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .priority
                .is_none_or(|priority| task.priority() == priority)
            && self.due_before.is_none_or(|bound| task.due_date() <= bound)
            && self.due_after.is_none_or(|bound| task.due_date() >= bound)
    }
}
