//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Users keyed externally by their unique email address.
    users (id) {
        id -> Int4,
        #[max_length = 255]
        email -> Varchar,
    }
}

diesel::table! {
    /// Orders with their product list stored as serialised JSON text.
    orders (id) {
        id -> Int4,
        userid -> Int4,
        products -> Text,
    }
}

diesel::joinable!(orders -> users (userid));

diesel::allow_tables_to_appear_in_same_query!(orders, users);
