//! Diesel table definitions for the order schema.
//!
//! Must match `backend/migrations`. Both tables use SQL keywords or short
//! names, so the Rust modules are pluralised and mapped with `sql_name`.

diesel::table! {
    /// Orders placed by customers.
    #[sql_name = "order"]
    orders (id) {
        /// Serial primary key.
        id -> Int4,
        /// Customer who placed the order.
        customer_id -> Int4,
        /// Carrier tracking number, when shipped.
        tracking_id -> Nullable<Int4>,
        /// Creation instant in UTC, defaulting to `now()`.
        created_time -> Timestamp,
        /// One of `PLACED`, `PAID`, `SHIPPED`, `DELIVERED`, `CANCELLED`.
        status -> Varchar,
    }
}

diesel::table! {
    /// Line items; rows are removed with their order.
    #[sql_name = "item"]
    items (id) {
        /// Serial primary key.
        id -> Int4,
        /// Owning order (`ON DELETE CASCADE`).
        order_id -> Int4,
        /// Product reference.
        product_id -> Int4,
        /// Units ordered, defaulting to 1.
        quantity -> Int4,
        /// Unit price.
        price -> Float8,
    }
}

diesel::joinable!(items -> orders (order_id));
diesel::allow_tables_to_appear_in_same_query!(items, orders);
