//! Orders and their line items.
//!
//! An [`Order`] is the aggregate root: it owns its [`Item`]s, which have no
//! lifecycle of their own. Input arrives as JSON mappings and is turned into
//! drafts ([`OrderDraft`], [`ItemDraft`]) through explicit boundary schemas;
//! stored entities serialise into [`OrderPayload`] and [`ItemPayload`].

mod item;
mod order;
mod status;
mod validation;

pub use item::{Item, ItemDraft, ItemPayload};
pub use order::{Order, OrderDraft, OrderParts, OrderPayload};
pub use status::{OrderStatus, ParseOrderStatusError};
pub use validation::{EntityKind, OrderValidationError};
