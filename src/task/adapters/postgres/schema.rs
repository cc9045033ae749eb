//! Diesel schema for task persistence.

diesel::table! {
    /// Task records scoped to a list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning list.
        list_id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Position among the list's tasks.
        position -> Int8,
        /// Task status token, kept for indexed filtering.
        #[max_length = 50]
        status -> Varchar,
        /// Serialized task.
        document -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
