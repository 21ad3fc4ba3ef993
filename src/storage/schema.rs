pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS merchant_activities (
        event_id        UUID PRIMARY KEY,
        merchant_id     VARCHAR(20)    NOT NULL,
        event_timestamp TIMESTAMP      NOT NULL,
        product         VARCHAR(20)    NOT NULL,
        event_type      VARCHAR(30)    NOT NULL,
        amount          DECIMAL(18, 2) DEFAULT 0,
        status          VARCHAR(10)    NOT NULL,
        channel         VARCHAR(10),
        region          VARCHAR(100),
        merchant_tier   VARCHAR(10)
    )
"#;

/// Read-side indexes backing the analytics aggregates.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_status ON merchant_activities (status)",
    "CREATE INDEX IF NOT EXISTS idx_product ON merchant_activities (product)",
    "CREATE INDEX IF NOT EXISTS idx_merchant ON merchant_activities (merchant_id)",
    "CREATE INDEX IF NOT EXISTS idx_ts_month ON merchant_activities (DATE_TRUNC('month', event_timestamp))",
    "CREATE INDEX IF NOT EXISTS idx_prod_stat ON merchant_activities (product, status)"
];

pub const INSERT_PREFIX: &str = "INSERT INTO merchant_activities \
    (event_id, merchant_id, event_timestamp, product, event_type, amount, status, channel, region, merchant_tier) ";

pub const INSERT_SUFFIX: &str = " ON CONFLICT (event_id) DO NOTHING";

pub const INSERT_COLUMNS: usize = 10;

pub const HAS_DATA: &str = "SELECT EXISTS (SELECT 1 FROM merchant_activities LIMIT 1)";
