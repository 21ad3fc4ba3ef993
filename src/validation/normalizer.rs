use std::str::FromStr;

use uuid::Uuid;

use crate::models::{ActivityEvent, Channel, Product, RawRecord, RejectReason, Status};
use crate::types::Amount;
use crate::validation::parse_timestamp;

/// Outcome of validating one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Accepted(ActivityEvent),
    Rejected(RejectReason)
}

/// Validates and cleans a raw record.
///
/// Identity, time, and classification fields reject the row when invalid.
/// Amount and channel are repaired instead: a bad amount becomes `0.00` and an
/// unknown channel becomes `None`. Fields are checked in column order, so the
/// reason reported is the first load-bearing field that failed.
pub fn normalize(raw: &RawRecord) -> Normalized {
    match build_event(raw) {
        Ok(event) => Normalized::Accepted(event),
        Err(reason) => Normalized::Rejected(reason)
    }
}

fn build_event(raw: &RawRecord) -> Result<ActivityEvent, RejectReason> {
    let event_id = field(&raw.event_id)
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or(RejectReason::InvalidEventId)?;

    let merchant_id = field(&raw.merchant_id)
        .ok_or(RejectReason::MissingMerchantId)?
        .to_string();

    let event_timestamp = field(&raw.event_timestamp)
        .and_then(parse_timestamp)
        .ok_or(RejectReason::InvalidTimestamp)?;

    let product = field(&raw.product)
        .and_then(|value| Product::from_str(value).ok())
        .ok_or(RejectReason::UnknownProduct)?;

    let event_type = field(&raw.event_type)
        .ok_or(RejectReason::MissingEventType)?
        .to_uppercase();

    let amount = Amount::parse_or_zero(field(&raw.amount));

    let status = field(&raw.status)
        .and_then(|value| Status::from_str(value).ok())
        .ok_or(RejectReason::UnknownStatus)?;

    let channel = field(&raw.channel)
        .and_then(|value| Channel::from_str(value).ok());

    let region = field(&raw.region)
        .map(str::to_string);

    let merchant_tier = field(&raw.merchant_tier)
        .map(str::to_uppercase);

    Ok(ActivityEvent {
        event_id,
        merchant_id,
        event_timestamp,
        product,
        event_type,
        amount,
        status,
        channel,
        region,
        merchant_tier
    })
}

/// Trimmed cell contents, with blank cells treated as absent.
fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
