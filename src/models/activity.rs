use chrono::NaiveDateTime;

use crate::models::{Channel, Product, Status};
use crate::types::{Amount, EventId, MerchantId};

/// A validated merchant activity event, ready to be persisted.
///
/// Built only by the normalizer. Column widths are not checked here: an
/// oversized value (e.g. a `merchant_tier` over 10 characters) fails the batch
/// it is written in, which aborts startup unless `continue_on_batch_error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    /// Natural key of the event; unique across the whole store.
    pub event_id: EventId,
    pub merchant_id: MerchantId,
    /// Wall-clock time of the event with any source offset dropped.
    pub event_timestamp: NaiveDateTime,
    pub product: Product,
    /// Uppercased free-form event type (e.g. `DOCUMENT_SUBMITTED`).
    pub event_type: String,
    pub amount: Amount,
    pub status: Status,
    pub channel: Option<Channel>,
    pub region: Option<String>,
    pub merchant_tier: Option<String>
}
