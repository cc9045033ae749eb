//! Diesel schema for attachment persistence.

diesel::table! {
    /// Attachment metadata scoped to a task.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Blob store object identifier.
        storage_id -> Text,
        /// Serialized attachment.
        document -> Jsonb,
        /// Upload timestamp.
        created_at -> Timestamptz,
    }
}
