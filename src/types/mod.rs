mod errors;
mod monetary;

#[cfg(test)]
pub use errors::AmountError;
pub use monetary::Amount;

pub type EventId = uuid::Uuid;
pub type MerchantId = String;
