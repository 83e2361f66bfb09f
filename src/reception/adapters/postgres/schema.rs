//! Diesel schema for reception persistence.

diesel::table! {
    /// Goods-reception records.
    receptions (id) {
        /// Record identifier.
        id -> Uuid,
        /// Reception date.
        date -> Timestamptz,
        /// Order number.
        #[max_length = 100]
        order_number -> Varchar,
        /// Part designation.
        #[max_length = 200]
        designation -> Varchar,
        /// Part name.
        name -> Text,
        /// Quantity as free text.
        #[max_length = 100]
        quantity -> Varchar,
        /// Route card number.
        #[max_length = 100]
        route_card_number -> Varchar,
        /// Reception status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
