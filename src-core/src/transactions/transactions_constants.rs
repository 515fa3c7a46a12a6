/// Transaction categories
///
/// Stored as snake_case strings on the transaction row; the canonical list
/// lives here so the categorizer and the budget matching agree on spelling.
pub const CATEGORY_GROCERIES: &str = "groceries";
pub const CATEGORY_RESTAURANTS: &str = "restaurants";
pub const CATEGORY_GAS: &str = "gas";
pub const CATEGORY_UTILITIES: &str = "utilities";
pub const CATEGORY_ENTERTAINMENT: &str = "entertainment";
pub const CATEGORY_MEDICAL: &str = "medical";
pub const CATEGORY_SHOPPING: &str = "shopping";
pub const CATEGORY_TRAVEL: &str = "travel";
pub const CATEGORY_EDUCATION: &str = "education";
pub const CATEGORY_CHARITY: &str = "charity";
pub const CATEGORY_BANK_FEES: &str = "bank_fees";
pub const CATEGORY_INCOME: &str = "income";
pub const CATEGORY_TRANSFER: &str = "transfer";
pub const CATEGORY_UNCATEGORIZED: &str = "uncategorized";

pub const ALL_CATEGORIES: [&str; 14] = [
    CATEGORY_GROCERIES,
    CATEGORY_RESTAURANTS,
    CATEGORY_GAS,
    CATEGORY_UTILITIES,
    CATEGORY_ENTERTAINMENT,
    CATEGORY_MEDICAL,
    CATEGORY_SHOPPING,
    CATEGORY_TRAVEL,
    CATEGORY_EDUCATION,
    CATEGORY_CHARITY,
    CATEGORY_BANK_FEES,
    CATEGORY_INCOME,
    CATEGORY_TRANSFER,
    CATEGORY_UNCATEGORIZED,
];

/// Transaction direction markers
pub const TRANSACTION_TYPE_DEBIT: &str = "debit";
pub const TRANSACTION_TYPE_CREDIT: &str = "credit";
