mod errors;
mod queries;
mod summary;

pub use errors::AnalyticsError;
pub use queries::{failure_rates, kyc_funnel, monthly_active_merchants, product_adoption, top_merchant};
pub use summary::{FailureRate, KycFunnel, MonthlyActiveMerchants, ProductAdoption, TopMerchant};

/// Year reported by the monthly active merchants aggregate unless configured otherwise.
pub const DEFAULT_ANALYTICS_YEAR: i32 = 2024;
