//! Leaderboard aggregation over task completion statistics.
//!
//! A pure reduction over all task records and the full user directory,
//! recomputed from scratch on every request. Results are a best-effort
//! point-in-time snapshot under concurrent task mutation.

use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::user::{
    domain::{AuthContext, IdentityError, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the leaderboard service.
#[derive(Debug, Clone, Error)]
pub enum LeaderboardError {
    /// The request carried no resolved caller identity.
    #[error(transparent)]
    Unauthorized(#[from] IdentityError),

    /// Underlying persistence failure; internal detail is not exposed.
    #[error("leaderboard store failure")]
    Store(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl From<TaskRepositoryError> for LeaderboardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::Persistence(source) => Self::Store(source),
            other => Self::Store(Arc::new(other)),
        }
    }
}

impl From<UserRepositoryError> for LeaderboardError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Persistence(source) => Self::Store(source),
        }
    }
}

/// Result type for leaderboard operations.
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Per-user task completion statistics.
///
/// A task whose creator is also an assignee contributes to both the
/// created and assigned tallies; the double counting is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    /// Tasks the user created.
    pub created_tasks: u32,
    /// Created tasks that are completed.
    pub completed_created_tasks: u32,
    /// Tasks the user is assigned to.
    pub assigned_tasks: u32,
    /// Assigned tasks that are completed.
    pub completed_assigned_tasks: u32,
    /// Created plus assigned tasks.
    pub total_tasks: u32,
    /// Completed created plus completed assigned tasks.
    pub completed_tasks: u32,
    /// `100 × completed / total`, rounded to two decimals; zero when the
    /// user has no tasks.
    pub completion_rate: f64,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based rank by sorted position; ties keep directory order.
    pub rank: u32,
    /// The ranked user.
    pub user: User,
    /// The user's completion statistics.
    pub stats: LeaderboardStats,
}

/// Leaderboard aggregation service.
#[derive(Clone)]
pub struct LeaderboardService<R, U>
where
    R: TaskRepository,
    U: UserRepository,
{
    tasks: Arc<R>,
    users: Arc<U>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    created: u32,
    completed_created: u32,
    assigned: u32,
    completed_assigned: u32,
}

impl Tally {
    #[expect(
        clippy::float_arithmetic,
        reason = "completion rate is a derived percentage"
    )]
    fn into_stats(self) -> LeaderboardStats {
        let total = self.created + self.assigned;
        let completed = self.completed_created + self.completed_assigned;
        let completion_rate = if total == 0 {
            0.0
        } else {
            let rate = f64::from(completed) * 100.0 / f64::from(total);
            (rate * 100.0).round() / 100.0
        };

        LeaderboardStats {
            created_tasks: self.created,
            completed_created_tasks: self.completed_created,
            assigned_tasks: self.assigned,
            completed_assigned_tasks: self.completed_assigned,
            total_tasks: total,
            completed_tasks: completed,
            completion_rate,
        }
    }
}

impl<R, U> LeaderboardService<R, U>
where
    R: TaskRepository,
    U: UserRepository,
{
    /// Creates a new leaderboard service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, users: Arc<U>) -> Self {
        Self { tasks, users }
    }

    /// Computes the global leaderboard: every known user ranked by
    /// completion rate, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError::Unauthorized`] without a caller
    /// identity, or [`LeaderboardError::Store`] on persistence failure.
    pub async fn compute(&self, auth: &AuthContext) -> LeaderboardResult<Vec<LeaderboardEntry>> {
        auth.caller()?;

        let users = self.users.list().await?;
        let tasks = self.tasks.list_all().await?;

        let mut tallies: HashMap<UserId, Tally> = HashMap::new();
        for task in &tasks {
            let completed = task.status().is_completed();
            let creator = tallies.entry(task.created_by()).or_default();
            creator.created += 1;
            if completed {
                creator.completed_created += 1;
            }
            for assignee in task.assigned_to() {
                let tally = tallies.entry(*assignee).or_default();
                tally.assigned += 1;
                if completed {
                    tally.completed_assigned += 1;
                }
            }
        }

        let mut entries: Vec<LeaderboardEntry> = users
            .into_iter()
            .map(|user| {
                let tally = tallies.get(&user.id()).copied().unwrap_or_default();
                LeaderboardEntry {
                    rank: 0,
                    user,
                    stats: tally.into_stats(),
                }
            })
            .collect();

        // Stable sort: equal rates keep directory order.
        entries.sort_by(|a, b| b.stats.completion_rate.total_cmp(&a.stats.completion_rate));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
        }
        Ok(entries)
    }
}
