//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Task description.
        #[max_length = 500]
        description -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority level.
        #[max_length = 10]
        priority -> Varchar,
        /// Required due date.
        due_date -> Timestamptz,
        /// Optional image reference.
        #[max_length = 255]
        image_url -> Nullable<Varchar>,
        /// Creator's user identifier; immutable after creation.
        created_by -> Uuid,
        /// Assignee user identifiers.
        assigned_to -> Array<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
    }
}
