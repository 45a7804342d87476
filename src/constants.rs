use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Primary key of the single utility-rate settings row.
pub const SETTINGS_ROW_ID: i32 = 1;

/// Default utility rates applied by `reset_to_defaults`.
pub const DEFAULT_ELECTRICITY_RATE: Decimal = dec!(1200);
pub const DEFAULT_WATER_RATE: Decimal = dec!(800);
pub const DEFAULT_WIFI_RATE: Decimal = dec!(1000);

/// Quiescence window for debounced invoice writes.
pub const DEBOUNCE_WINDOW_MS: u64 = 1000;

pub const PAYMENT_GATEWAY_BASE_URL: &str = "https://api.paymongo.com/v1";
pub const PAYMENT_CURRENCY: &str = "PHP";
pub const PAYMENT_METHODS_ALLOWED: [&str; 3] = ["card", "paymaya", "gcash"];
pub const PAYMENT_SECRET_KEY_ENV: &str = "PAYMONGO_SECRET_KEY";

/// Custom-ID prefixes for registered accounts.
pub const ADMIN_ID_PREFIX: &str = "ADMIN";
pub const TENANT_ID_PREFIX: &str = "TENANT";
