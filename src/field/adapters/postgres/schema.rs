//! Diesel schema for field definition persistence.

diesel::table! {
    /// Custom field definitions scoped to a list.
    field_definitions (id) {
        /// Field identifier.
        id -> Uuid,
        /// Owning list.
        list_id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Position among the list's fields.
        position -> Int8,
        /// Serialized definition.
        document -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
