//! Diesel schema for workspace and user persistence.

diesel::table! {
    /// User records keyed by normalized email.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Normalized email address.
        email -> Text,
        /// Serialized user.
        document -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Workspace records.
    workspaces (id) {
        /// Workspace identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Serialized workspace.
        document -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
