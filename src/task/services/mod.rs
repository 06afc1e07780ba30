//! Application services for task lifecycle orchestration and the
//! leaderboard aggregation.

mod error;
mod leaderboard;
mod lifecycle;

pub use error::{TaskServiceError, TaskServiceResult};
pub use leaderboard::{
    LeaderboardEntry, LeaderboardError, LeaderboardResult, LeaderboardService, LeaderboardStats,
};
pub use lifecycle::{CreateTaskRequest, TaskLifecycleService};
