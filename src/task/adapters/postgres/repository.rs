//! `PostgreSQL` repository implementation for task storage and scoped
//! queries.
//!
//! Sort orders are applied in SQL; the priority ordering uses a CASE rank
//! expression equivalent to the in-memory rank mapping so both store paths
//! agree.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    query::{Scope, SortField, SortOrder, SortableField, TaskPredicate, TaskQuery},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::dsl::{AsSelect, IntoBoxed, Select};
use diesel::expression::SqlLiteral;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Integer;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

type BoxedTaskQuery<'a> = IntoBoxed<'a, Select<tasks::table, AsSelect<TaskRow, Pg>>, Pg>;

/// Applies the scope and filter predicate to a boxed query.
///
/// A macro rather than a function so it can serve both the row query and
/// the count query, which box to different statement types.
macro_rules! filter_by_predicate {
    ($query:expr, $predicate:expr) => {{
        let mut filtered = $query;
        if let Scope::Member(member) = $predicate.scope {
            let member_id = member.into_inner();
            filtered = filtered.filter(
                tasks::created_by
                    .eq(member_id)
                    .or(tasks::assigned_to.contains(vec![member_id])),
            );
        }
        if let Some(status) = $predicate.status {
            filtered = filtered.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(priority) = $predicate.priority {
            filtered = filtered.filter(tasks::priority.eq(priority.as_str()));
        }
        if let Some(bound) = $predicate.due_before {
            filtered = filtered.filter(tasks::due_date.le(bound));
        }
        if let Some(bound) = $predicate.due_after {
            filtered = filtered.filter(tasks::due_date.ge(bound));
        }
        filtered
    }};
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_page(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let spec = query.clone();
        self.run_blocking(move |connection| {
            let statement = filter_by_predicate!(
                tasks::table.select(TaskRow::as_select()).into_boxed(),
                spec.predicate
            );
            let rows = apply_sort(statement, &spec.sort)
                .offset(spec.skip)
                .limit(spec.limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, predicate: &TaskPredicate) -> TaskRepositoryResult<u64> {
        let filter = *predicate;
        self.run_blocking(move |connection| {
            let total: i64 = filter_by_predicate!(
                tasks::table.select(diesel::dsl::count_star()).into_boxed(),
                filter
            )
            .first(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(u64::try_from(total).unwrap_or_default())
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// SQL rank expression matching [`TaskPriority::rank`].
fn priority_rank_sql() -> SqlLiteral<Integer> {
    diesel::dsl::sql::<Integer>("CASE priority WHEN 'High' THEN 1 WHEN 'Medium' THEN 2 ELSE 3 END")
}

fn apply_sort(query: BoxedTaskQuery<'static>, sort: &SortOrder) -> BoxedTaskQuery<'static> {
    match sort {
        SortOrder::CreatedAtDesc => query.order(tasks::created_at.desc()),
        SortOrder::DueDateAsc => query.order(tasks::due_date.asc()),
        SortOrder::DueDateDesc => query.order(tasks::due_date.desc()),
        SortOrder::PriorityHighFirst => query
            .order(priority_rank_sql().asc())
            .then_order_by(tasks::created_at.desc()),
        SortOrder::PriorityLowFirst => query
            .order(priority_rank_sql().desc())
            .then_order_by(tasks::created_at.desc()),
        SortOrder::Fields(fields) => {
            let mut ordered = query;
            for (index, field) in fields.iter().enumerate() {
                ordered = apply_field_order(ordered, *field, index == 0);
            }
            ordered
        }
    }
}

fn apply_field_order(
    query: BoxedTaskQuery<'static>,
    field: SortField,
    first: bool,
) -> BoxedTaskQuery<'static> {
    macro_rules! ordered {
        ($expr:expr) => {
            if first {
                query.order($expr)
            } else {
                query.then_order_by($expr)
            }
        };
    }

    match (field.field, field.descending) {
        (SortableField::Title, false) => ordered!(tasks::title.asc()),
        (SortableField::Title, true) => ordered!(tasks::title.desc()),
        (SortableField::Status, false) => ordered!(tasks::status.asc()),
        (SortableField::Status, true) => ordered!(tasks::status.desc()),
        (SortableField::Priority, false) => ordered!(priority_rank_sql().asc()),
        (SortableField::Priority, true) => ordered!(priority_rank_sql().desc()),
        (SortableField::DueDate, false) => ordered!(tasks::due_date.asc()),
        (SortableField::DueDate, true) => ordered!(tasks::due_date.desc()),
        (SortableField::CreatedAt, false) => ordered!(tasks::created_at.asc()),
        (SortableField::CreatedAt, true) => ordered!(tasks::created_at.desc()),
        (SortableField::UpdatedAt, false) => ordered!(tasks::updated_at.asc()),
        (SortableField::UpdatedAt, true) => ordered!(tasks::updated_at.desc()),
    }
}

fn to_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        image_url: task.image_url().map(str::to_owned),
        created_by: task.created_by().into_inner(),
        assigned_to: task
            .assigned_to()
            .iter()
            .map(|user| user.into_inner())
            .collect(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        status,
        priority,
        due_date: row.due_date,
        image_url: row.image_url,
        created_by: UserId::from_uuid(row.created_by),
        assigned_to: row.assigned_to.into_iter().map(UserId::from_uuid).collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
