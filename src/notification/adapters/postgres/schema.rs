//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-user notification queue records.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Target user identifier.
        user_id -> Uuid,
        /// Related task identifier.
        task_id -> Uuid,
        /// Message text.
        message -> Text,
        /// Read flag.
        read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
