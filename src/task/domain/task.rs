//! Task aggregate root and related lifecycle types.

use super::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError, TaskId};
use crate::user::domain::{Caller, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum task description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Task workflow status.
///
/// Any status may transition to any other; the only conditional behavior is
/// the completion notification decided by the lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns `true` when the status is [`TaskStatus::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::ToDo
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "To Do" => Ok(Self::ToDo),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the sort rank: High orders before Medium, Medium before Low.
    ///
    /// Every priority sort path (in-memory comparator and SQL CASE
    /// expression) derives from this single mapping.
    #[must_use]
    pub const fn rank(self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    image_url: Option<String>,
    created_by: UserId,
    assigned_to: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title (required, at most [`MAX_TITLE_LENGTH`] characters).
    pub title: String,
    /// Task description (required, at most [`MAX_DESCRIPTION_LENGTH`]
    /// characters).
    pub description: String,
    /// Workflow status; defaults to [`TaskStatus::ToDo`] when omitted.
    pub status: Option<TaskStatus>,
    /// Priority; defaults to [`TaskPriority::Medium`] when omitted.
    pub priority: Option<TaskPriority>,
    /// Required due date.
    pub due_date: DateTime<Utc>,
    /// Initial assignee set; may be empty.
    pub assigned_to: Vec<UserId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted image reference, if any.
    pub image_url: Option<String>,
    /// Persisted creator identifier.
    pub created_by: UserId,
    /// Persisted assignee set.
    pub assigned_to: Vec<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to an existing task.
///
/// The task identifier and creator are deliberately not representable here;
/// both are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement workflow status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement image reference.
    pub image_url: Option<String>,
    /// Replacement assignee set (full replacement, not additive).
    pub assigned_to: Option<Vec<UserId>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a replacement image reference.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets a replacement assignee set.
    #[must_use]
    pub fn with_assigned_to(mut self, assigned_to: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_to = Some(assigned_to.into_iter().collect());
        self
    }
}

impl Task {
    /// Creates a new task owned by `creator`.
    ///
    /// Status and priority default when omitted; title and description are
    /// validated against the domain limits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title or description is empty
    /// or exceeds its length limit.
    pub fn create(
        data: NewTaskData,
        creator: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = validate_title(data.title)?;
        let description = validate_description(data.description)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title,
            description,
            status: data.status.unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            image_url: None,
            created_by: creator,
            assigned_to: data.assigned_to,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            image_url: data.image_url,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the image reference, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the creator's user identifier.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the current assignee set.
    #[must_use]
    pub fn assigned_to(&self) -> &[UserId] {
        &self.assigned_to
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` is a member of the assignee set.
    #[must_use]
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assigned_to.contains(&user)
    }

    /// Returns `true` when the caller may read this task: administrators,
    /// the creator, and current assignees.
    #[must_use]
    pub fn is_visible_to(&self, caller: &Caller) -> bool {
        caller.is_admin() || self.created_by == caller.id() || self.is_assigned_to(caller.id())
    }

    /// Returns `true` when the caller may edit fields, delete, or reassign
    /// this task: administrators and the creator only.
    #[must_use]
    pub fn can_be_edited_by(&self, caller: &Caller) -> bool {
        caller.is_admin() || self.created_by == caller.id()
    }

    /// Returns `true` when the caller may transition the workflow status.
    ///
    /// Broader than editing: assignees may also move status.
    #[must_use]
    pub fn can_transition_status(&self, caller: &Caller) -> bool {
        self.is_visible_to(caller)
    }

    /// Applies a partial field update and refreshes the mutation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when a replacement title or description
    /// fails validation; no field is applied on failure.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let validated_title = changes.title.map(validate_title).transpose()?;
        let validated_description = changes.description.map(validate_description).transpose()?;

        if let Some(title) = validated_title {
            self.title = title;
        }
        if let Some(description) = validated_description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(assigned_to) = changes.assigned_to {
            self.assigned_to = assigned_to;
        }
        self.touch(clock);
        Ok(())
    }

    /// Sets the workflow status and refreshes the mutation timestamp.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Replaces the assignee set and refreshes the mutation timestamp.
    pub fn replace_assignees(&mut self, assigned_to: Vec<UserId>, clock: &impl Clock) {
        self.assigned_to = assigned_to;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Validates and normalizes a task title.
fn validate_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let length = trimmed.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TaskDomainError::TitleTooLong {
            length,
            limit: MAX_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_owned())
}

/// Validates a task description.
fn validate_description(description: String) -> Result<String, TaskDomainError> {
    if description.trim().is_empty() {
        return Err(TaskDomainError::EmptyDescription);
    }
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(TaskDomainError::DescriptionTooLong {
            length,
            limit: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(description)
}
