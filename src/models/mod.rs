mod activity;
mod errors;
mod raw;
#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use activity::ActivityEvent;
pub use errors::{RejectReason, UnknownVariant};
pub use raw::RawRecord;

/// Product lines a merchant event can belong to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Product {
    Pos,
    Airtime,
    Bills,
    CardPayment,
    Savings,
    Moniebook,
    Kyc
}

impl Product {
    pub const ALL: [Product; 7] = [
        Product::Pos,
        Product::Airtime,
        Product::Bills,
        Product::CardPayment,
        Product::Savings,
        Product::Moniebook,
        Product::Kyc
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Pos => "POS",
            Product::Airtime => "AIRTIME",
            Product::Bills => "BILLS",
            Product::CardPayment => "CARD_PAYMENT",
            Product::Savings => "SAVINGS",
            Product::Moniebook => "MONIEBOOK",
            Product::Kyc => "KYC"
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    Success,
    Failed,
    Pending
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Success, Status::Failed, Status::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Failed => "FAILED",
            Status::Pending => "PENDING"
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Channel {
    Pos,
    App,
    Ussd,
    Web,
    Offline
}

impl Channel {
    pub const ALL: [Channel; 5] = [Channel::Pos, Channel::App, Channel::Ussd, Channel::Web, Channel::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Pos => "POS",
            Channel::App => "APP",
            Channel::Ussd => "USSD",
            Channel::Web => "WEB",
            Channel::Offline => "OFFLINE"
        }
    }
}

/// Case-insensitive lookup against the canonical uppercase names of a fixed enumeration.
macro_rules! impl_enumeration {
    ($name:ident, $kind:literal) => {
        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_uppercase();

                $name::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == normalized)
                    .ok_or_else(|| UnknownVariant::new($kind, value))
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

impl_enumeration!(Product, "product");
impl_enumeration!(Status, "status");
impl_enumeration!(Channel, "channel");
