/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// All prices are fixed-point decimals (NUMERIC in PostgreSQL).
pub type Price = rust_decimal::Decimal;
