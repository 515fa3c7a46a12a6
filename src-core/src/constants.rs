/// Default base currency for new users.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default timezone for new users.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Decimal places used when rounding display amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Hard cap on transaction page sizes.
pub const MAX_TRANSACTION_PAGE_SIZE: i64 = 100;

/// Default transaction page size.
pub const DEFAULT_TRANSACTION_PAGE_SIZE: i64 = 50;
