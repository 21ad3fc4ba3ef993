use super::{Channel, Product, RawRecord, Status, UnknownVariant};

use std::str::FromStr;

use anyhow::Result;

#[test]
fn test_product_parses_case_insensitively() -> Result<()> {
    assert_eq!(Product::from_str("pos")?, Product::Pos);
    assert_eq!(Product::from_str(" Card_Payment ")?, Product::CardPayment);
    assert_eq!(Product::from_str("MONIEBOOK")?, Product::Moniebook);
    assert_eq!(Product::from_str("kyc")?.to_string(), "KYC");

    Ok(())
}

#[test]
fn test_product_rejects_unknown_lines() {
    let result = Product::from_str("LOANS");

    assert_eq!(result, Err(UnknownVariant::new("product", "LOANS")));
    assert!(Product::from_str("").is_err());
    assert!(Product::from_str("CARD PAYMENT").is_err());
}

#[test]
fn test_status_parses_only_the_three_outcomes() -> Result<()> {
    assert_eq!(Status::from_str("success")?, Status::Success);
    assert_eq!(Status::from_str("Failed")?, Status::Failed);
    assert_eq!(Status::from_str("PENDING")?, Status::Pending);
    assert!(Status::from_str("REVERSED").is_err());

    Ok(())
}

#[test]
fn test_channel_round_trips_canonical_names() -> Result<()> {
    for channel in Channel::ALL {
        assert_eq!(Channel::from_str(&channel.as_str().to_lowercase())?, channel);
    }

    assert!(Channel::from_str("ATM").is_err());

    Ok(())
}

#[test]
fn test_raw_record_ignores_unknown_and_missing_columns() -> Result<()> {
    let data = "event_id,merchant_id,unexpected,amount\nabc,MRC-000001,whatever,\n";
    let mut reader = csv::Reader::from_reader(data.as_bytes());

    let record: RawRecord = reader.deserialize().next().ok_or_else(|| anyhow::anyhow!("row missing"))??;

    assert_eq!(record.event_id.as_deref(), Some("abc"));
    assert_eq!(record.merchant_id.as_deref(), Some("MRC-000001"));
    assert_eq!(record.amount, None);
    assert_eq!(record.status, None);
    assert_eq!(record.merchant_tier, None);

    Ok(())
}
