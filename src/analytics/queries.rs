use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::analytics::summary::KYC_STAGES;
use crate::analytics::{AnalyticsError, FailureRate, KycFunnel, MonthlyActiveMerchants, ProductAdoption, TopMerchant};

const TOP_MERCHANT: &str = r#"
    SELECT  merchant_id,
            ROUND(SUM(amount), 2) AS total_volume
    FROM    merchant_activities
    WHERE   status = 'SUCCESS'
    GROUP BY merchant_id
    ORDER BY total_volume DESC NULLS LAST
    LIMIT 1
"#;

const MONTHLY_ACTIVE_MERCHANTS: &str = r#"
    SELECT  TO_CHAR(DATE_TRUNC('month', event_timestamp), 'YYYY-MM') AS month,
            COUNT(DISTINCT merchant_id) AS active_merchants
    FROM    merchant_activities
    WHERE   status = 'SUCCESS'
      AND   event_timestamp >= $1
      AND   event_timestamp <  $2
    GROUP BY 1
    ORDER BY 1
"#;

const PRODUCT_ADOPTION: &str = r#"
    SELECT  product,
            COUNT(DISTINCT merchant_id) AS merchant_count
    FROM    merchant_activities
    GROUP BY product
"#;

const KYC_FUNNEL: &str = r#"
    SELECT  event_type,
            COUNT(DISTINCT merchant_id) AS merchant_count
    FROM    merchant_activities
    WHERE   product = 'KYC'
      AND   status  = 'SUCCESS'
      AND   event_type = ANY($1)
    GROUP BY event_type
"#;

const FAILURE_COUNTS: &str = r#"
    SELECT  product,
            COUNT(*) FILTER (WHERE status = 'FAILED')                AS failed,
            COUNT(*) FILTER (WHERE status IN ('SUCCESS', 'FAILED'))  AS settled
    FROM    merchant_activities
    GROUP BY product
"#;

/// Merchant with the highest total SUCCESS volume.
pub async fn top_merchant(pool: &PgPool) -> Result<TopMerchant, AnalyticsError> {
    let row = sqlx::query_as::<_, (String, Option<Decimal>)>(TOP_MERCHANT)
        .fetch_optional(pool)
        .await?;

    Ok(TopMerchant::from_row(row))
}

/// Distinct merchants with a SUCCESS event in each month of `year`.
pub async fn monthly_active_merchants(pool: &PgPool, year: i32) -> Result<MonthlyActiveMerchants, AnalyticsError> {
    let (start, end) = year_bounds(year).ok_or(AnalyticsError::InvalidYear(year))?;

    let rows = sqlx::query_as::<_, (String, i64)>(MONTHLY_ACTIVE_MERCHANTS)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

    Ok(MonthlyActiveMerchants::for_year(year, rows))
}

pub async fn product_adoption(pool: &PgPool) -> Result<ProductAdoption, AnalyticsError> {
    let rows = sqlx::query_as::<_, (String, i64)>(PRODUCT_ADOPTION)
        .fetch_all(pool)
        .await?;

    Ok(ProductAdoption::from_rows(rows))
}

pub async fn kyc_funnel(pool: &PgPool) -> Result<KycFunnel, AnalyticsError> {
    let rows = sqlx::query_as::<_, (String, i64)>(KYC_FUNNEL)
        .bind(&KYC_STAGES[..])
        .fetch_all(pool)
        .await?;

    Ok(KycFunnel::from_rows(rows))
}

/// Failure percentage per product; PENDING events count on neither side.
pub async fn failure_rates(pool: &PgPool) -> Result<Vec<FailureRate>, AnalyticsError> {
    let rows = sqlx::query_as::<_, (String, i64, i64)>(FAILURE_COUNTS)
        .fetch_all(pool)
        .await?;

    Ok(FailureRate::rank(rows))
}

/// Half-open `[Jan 1 of year, Jan 1 of year + 1)` window.
pub(crate) fn year_bounds(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?.and_hms_opt(0, 0, 0)?;

    Some((start, end))
}
