//! Diesel schema for list persistence.

diesel::table! {
    /// Task lists scoped to a workspace.
    task_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Position among the workspace's lists.
        position -> Int8,
        /// Serialized list.
        document -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
