//! Domain primitives, aggregates and services.
//!
//! Purpose: define the order model used by the HTTP and persistence
//! adapters, the ports those adapters plug into, and the service that ties
//! them together. Types document their invariants and serde contracts in
//! their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.
//! - Order, Item and their drafts and payloads: the data model.
//! - OrderService: implementation of the driving ports.

pub mod error;
pub mod order_service;
pub mod orders;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::order_service::OrderService;
pub use self::orders::{
    EntityKind, Item, ItemDraft, ItemPayload, Order, OrderDraft, OrderParts, OrderPayload,
    OrderStatus, OrderValidationError, ParseOrderStatusError,
};
pub use self::trace_id::TraceId;
