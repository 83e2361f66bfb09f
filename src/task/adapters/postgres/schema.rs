//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Unique work-order number (covers archived tasks too).
        #[max_length = 100]
        number -> Varchar,
        /// Task name.
        name -> Text,
        /// Task description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional priority text.
        #[max_length = 100]
        priority -> Nullable<Varchar>,
        /// Optional responsible person.
        responsible -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Optional serialized attachments reference.
        attachments -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, set once when the task first reaches
        /// done.
        completed_at -> Nullable<Timestamptz>,
        /// Archival flag, one-way true.
        archived -> Bool,
    }
}

diesel::table! {
    /// Append-only task change history.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Referenced task (non-owning; survives task deletion).
        task_id -> Uuid,
        /// Recorded action.
        #[max_length = 50]
        action -> Varchar,
        /// Human-readable summary.
        details -> Text,
        /// Changed field name, empty for non-field-level actions.
        #[max_length = 50]
        field_name -> Varchar,
        /// Serialized value before the change.
        old_value -> Text,
        /// Serialized value after the change.
        new_value -> Text,
        /// Actor that made the change.
        #[max_length = 100]
        actor -> Varchar,
        /// When the change happened.
        timestamp -> Timestamptz,
        /// Whether the entry can be re-applied in reverse.
        can_revert -> Bool,
    }
}

diesel::table! {
    /// Saved list-filter presets.
    saved_filters (id) {
        /// Preset identifier.
        id -> Uuid,
        /// Preset name.
        #[max_length = 200]
        name -> Varchar,
        /// Serialized filter criteria.
        criteria -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
