use serde::Deserialize;

/// One data row of a source file, exactly as read.
///
/// Every known column is optional so that missing columns and empty cells both
/// arrive as `None`. Columns outside this set are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub event_id: Option<String>,
    pub merchant_id: Option<String>,
    pub event_timestamp: Option<String>,
    pub product: Option<String>,
    pub event_type: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub region: Option<String>,
    pub merchant_tier: Option<String>
}
