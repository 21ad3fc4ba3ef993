use thiserror::Error;

/// Why a raw record was dropped instead of being persisted.
///
/// Only the fields that identify, time, or classify an event can reject a row;
/// amount and channel defects are repaired during normalization instead.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Error)]
pub enum RejectReason {
    #[error("event_id is missing or is not a valid UUID")]
    InvalidEventId,
    #[error("merchant_id is missing or empty")]
    MissingMerchantId,
    #[error("event_timestamp is missing or could not be parsed")]
    InvalidTimestamp,
    #[error("product is not a known product line")]
    UnknownProduct,
    #[error("event_type is missing or empty")]
    MissingEventType,
    #[error("status is not one of SUCCESS, FAILED, PENDING")]
    UnknownStatus,
    #[error("row could not be decoded")]
    Malformed
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Unknown {kind} [{value}]")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}
