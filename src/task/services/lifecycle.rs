//! Task lifecycle orchestration: creation, scoped listing, field updates,
//! status transitions, assignment, and deletion.
//!
//! Every mutation commits the task record first and only then hands its
//! side-effect list to the notification dispatcher, so a dispatch failure
//! can never roll back a committed task change.

use super::{TaskServiceError, TaskServiceResult};
use crate::notification::{
    domain::NotificationRequest, ports::NotificationRepository, services::NotificationDispatcher,
};
use crate::task::{
    domain::{NewTaskData, Task, TaskChanges, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    query::{ListTasksRequest, Pagination, Scope, TaskPage, build_query, task_to_json},
};
use crate::user::{
    domain::{AuthContext, UserId},
    ports::UserRepository,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
///
/// The due date is part of the constructor because tasks without one are
/// invalid; status and priority default when not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: DateTime<Utc>,
    assigned_to: Vec<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: None,
            priority: None,
            due_date,
            assigned_to: Vec::new(),
        }
    }

    /// Sets an explicit initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets an explicit priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the initial assignee set.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_to = assignees.into_iter().collect();
        self
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, N, C>
where
    R: TaskRepository,
    U: UserRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    users: Arc<U>,
    dispatcher: NotificationDispatcher<N, C>,
    clock: Arc<C>,
}

impl<R, U, N, C> TaskLifecycleService<R, U, N, C>
where
    R: TaskRepository,
    U: UserRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        users: Arc<U>,
        dispatcher: NotificationDispatcher<N, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            users,
            dispatcher,
            clock,
        }
    }

    /// Creates a task owned by the caller and notifies initial assignees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a caller
    /// identity, [`TaskServiceError::Validation`] when a field fails
    /// domain validation, or [`TaskServiceError::Store`] on persistence
    /// failure.
    pub async fn create(
        &self,
        auth: &AuthContext,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let caller = auth.caller()?;
        let task = Task::create(
            NewTaskData {
                title: request.title,
                description: request.description,
                status: request.status,
                priority: request.priority,
                due_date: request.due_date,
                assigned_to: request.assigned_to,
            },
            caller.id(),
            &*self.clock,
        )?;
        self.tasks.insert(&task).await?;

        let requests = task
            .assigned_to()
            .iter()
            .map(|assignee| {
                NotificationRequest::assigned_to_new_task(*assignee, task.id(), task.title())
            })
            .collect();
        self.dispatcher.dispatch(requests).await;
        Ok(task)
    }

    /// Lists tasks inside the caller's scope with the requested filters,
    /// sort order, pagination, and projection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a caller
    /// identity, [`TaskServiceError::Query`] for malformed sort
    /// expressions, or [`TaskServiceError::Store`] on persistence failure.
    pub async fn list(
        &self,
        auth: &AuthContext,
        request: &ListTasksRequest,
    ) -> TaskServiceResult<TaskPage> {
        let caller = auth.caller()?;
        let query = build_query(Scope::for_caller(caller), request)?;
        let tasks = self.tasks.find_page(&query).await?;
        let total = self.tasks.count(&query.predicate).await?;
        let pagination = Pagination::for_page(query.page, query.page_size, total);

        let items = tasks
            .iter()
            .map(|task| {
                query
                    .projection
                    .as_ref()
                    .map_or_else(|| task_to_json(task), |selection| selection.apply(task))
            })
            .collect();
        Ok(TaskPage::new(items, total, pagination))
    }

    /// Retrieves a single task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when absent and
    /// [`TaskServiceError::Forbidden`] when the caller is neither admin,
    /// creator, nor assignee.
    pub async fn get(&self, auth: &AuthContext, id: TaskId) -> TaskServiceResult<Task> {
        let caller = auth.caller()?;
        let task = self.find_task(id).await?;
        if !task.is_visible_to(caller) {
            return Err(TaskServiceError::Forbidden { action: "access" });
        }
        Ok(task)
    }

    /// Applies a partial field update; creator or admin only.
    ///
    /// Users newly present in a replaced assignee set are notified;
    /// removed users are not. The task identifier and creator are
    /// immutable by construction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::Forbidden`], or
    /// [`TaskServiceError::Validation`] when a replacement field fails
    /// domain validation.
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: TaskId,
        changes: TaskChanges,
    ) -> TaskServiceResult<Task> {
        let caller = auth.caller()?;
        let mut task = self.find_task(id).await?;
        if !task.can_be_edited_by(caller) {
            return Err(TaskServiceError::Forbidden { action: "update" });
        }

        let previous_assignees = task.assigned_to().to_vec();
        task.apply_changes(changes, &*self.clock)?;
        self.tasks.update(&task).await?;

        let requests = assignment_notifications(&previous_assignees, &task);
        self.dispatcher.dispatch(requests).await;
        Ok(task)
    }

    /// Deletes a task; creator or admin only. Irreversible, and no
    /// notification fires.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Forbidden`].
    pub async fn delete(&self, auth: &AuthContext, id: TaskId) -> TaskServiceResult<()> {
        let caller = auth.caller()?;
        let task = self.find_task(id).await?;
        if !task.can_be_edited_by(caller) {
            return Err(TaskServiceError::Forbidden { action: "delete" });
        }
        self.tasks.delete(task.id()).await?;
        Ok(())
    }

    /// Transitions the workflow status; creator, admin, or any current
    /// assignee may do so.
    ///
    /// Completing a task notifies its creator unless the caller is the
    /// creator; no other transition produces a notification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::Forbidden`].
    pub async fn update_status(
        &self,
        auth: &AuthContext,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let caller = auth.caller()?;
        let mut task = self.find_task(id).await?;
        if !task.can_transition_status(caller) {
            return Err(TaskServiceError::Forbidden {
                action: "update the status of",
            });
        }

        let previous_status = task.status();
        task.set_status(status, &*self.clock);
        self.tasks.update(&task).await?;

        let mut requests = Vec::new();
        if status.is_completed()
            && !previous_status.is_completed()
            && task.created_by() != caller.id()
        {
            requests.push(NotificationRequest::task_completed(
                task.created_by(),
                task.id(),
                task.title(),
            ));
        }
        self.dispatcher.dispatch(requests).await;
        Ok(task)
    }

    /// Replaces the assignee set; creator or admin only.
    ///
    /// Every target user must exist: validation happens before any commit
    /// and a single unknown identifier fails the whole request with no
    /// partial assignment and no notifications. Only newly added users
    /// are notified.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::EmptyAssigneeList`] for an empty id
    /// list, [`TaskServiceError::UserNotFound`] for an unknown target,
    /// [`TaskServiceError::TaskNotFound`], or
    /// [`TaskServiceError::Forbidden`].
    pub async fn assign(
        &self,
        auth: &AuthContext,
        id: TaskId,
        user_ids: Vec<UserId>,
    ) -> TaskServiceResult<Task> {
        let caller = auth.caller()?;
        if user_ids.is_empty() {
            return Err(TaskServiceError::EmptyAssigneeList);
        }

        let mut task = self.find_task(id).await?;
        if !task.can_be_edited_by(caller) {
            return Err(TaskServiceError::Forbidden { action: "assign" });
        }

        for user_id in &user_ids {
            if self.users.find_by_id(*user_id).await?.is_none() {
                return Err(TaskServiceError::UserNotFound(*user_id));
            }
        }

        let previous_assignees = task.assigned_to().to_vec();
        task.replace_assignees(user_ids, &*self.clock);
        self.tasks.update(&task).await?;

        let requests = assignment_notifications(&previous_assignees, &task);
        self.dispatcher.dispatch(requests).await;
        Ok(task)
    }

    async fn find_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }
}

/// Builds one assignment notification per user newly present in the
/// task's assignee set relative to `previous`.
fn assignment_notifications(previous: &[UserId], task: &Task) -> Vec<NotificationRequest> {
    task.assigned_to()
        .iter()
        .filter(|assignee| !previous.contains(assignee))
        .map(|assignee| NotificationRequest::assigned_to_task(*assignee, task.id(), task.title()))
        .collect()
}
