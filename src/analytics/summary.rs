use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Event types counted by the KYC funnel, in funnel order.
pub const KYC_STAGES: [&str; 3] = ["DOCUMENT_SUBMITTED", "VERIFICATION_COMPLETED", "TIER_UPGRADE"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMerchant {
    pub merchant_id: Option<String>,
    pub total_volume: f64
}

impl TopMerchant {
    /// Builds the response from the leading `(merchant_id, SUM(amount))` row, if any.
    pub fn from_row(row: Option<(String, Option<Decimal>)>) -> Self {
        match row {
            Some((merchant_id, Some(volume))) => Self {
                merchant_id: Some(merchant_id),
                total_volume: to_f64(volume.round_dp(2))
            },
            _ => Self {
                merchant_id: None,
                total_volume: 0.0
            }
        }
    }
}

/// Distinct active merchants per `YYYY-MM`, always holding all twelve months of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyActiveMerchants(BTreeMap<String, i64>);

impl MonthlyActiveMerchants {
    pub fn for_year(year: i32, rows: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut months: BTreeMap<String, i64> = (1..=12)
            .map(|month| (format!("{year:04}-{month:02}"), 0))
            .collect();

        for (month, count) in rows {
            if let Some(slot) = months.get_mut(&month) {
                *slot = count;
            }
        }

        Self(months)
    }

    #[cfg(test)]
    pub fn get(&self, month: &str) -> Option<i64> {
        self.0.get(month).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Distinct merchants per product, ordered by merchant count descending.
///
/// Serialized as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAdoption(Vec<(String, i64)>);

impl ProductAdoption {
    pub fn from_rows(mut rows: Vec<(String, i64)>) -> Self {
        rows.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
        Self(rows)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(String, i64)] {
        &self.0
    }
}

impl Serialize for ProductAdoption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (product, merchants) in &self.0 {
            map.serialize_entry(product, merchants)?;
        }

        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KycFunnel {
    pub documents_submitted: i64,
    pub verifications_completed: i64,
    pub tier_upgrades: i64
}

impl KycFunnel {
    /// Maps `(event_type, merchants)` rows onto the funnel; absent stages stay at zero.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut funnel = KycFunnel::default();

        for (event_type, merchants) in rows {
            match event_type.as_str() {
                "DOCUMENT_SUBMITTED" => funnel.documents_submitted = merchants,
                "VERIFICATION_COMPLETED" => funnel.verifications_completed = merchants,
                "TIER_UPGRADE" => funnel.tier_upgrades = merchants,
                _ => {}
            }
        }

        funnel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRate {
    pub product: String,
    pub failure_rate: f64
}

impl FailureRate {
    /// Turns `(product, failed, settled)` counts into rates, highest first.
    ///
    /// `settled` counts SUCCESS and FAILED events only, so PENDING never moves a rate.
    pub fn rank(rows: Vec<(String, i64, i64)>) -> Vec<FailureRate> {
        let mut rates: Vec<(String, Decimal)> = rows.into_iter()
            .map(|(product, failed, settled)| (product, failure_percentage(failed, settled)))
            .collect();

        rates.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

        rates.into_iter()
            .map(|(product, rate)| FailureRate { product, failure_rate: to_f64(rate) })
            .collect()
    }
}

/// `100 * failed / settled` to one decimal place, or zero when nothing settled.
pub fn failure_percentage(failed: i64, settled: i64) -> Decimal {
    if settled <= 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(failed) * Decimal::ONE_HUNDRED / Decimal::from(settled))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
