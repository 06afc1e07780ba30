//! Diesel schema for user directory records.

diesel::table! {
    /// User records owned by the identity provider.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 50]
        username -> Varchar,
        /// Email address.
        #[max_length = 255]
        email -> Varchar,
        /// Access role (`regular` or `admin`).
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp; defines stable directory order.
        created_at -> Timestamptz,
    }
}
