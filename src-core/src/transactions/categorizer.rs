use crate::transactions::transactions_model::TransactionCategory;

// Keyword rules checked against the lowercased description and merchant
// name. First hit wins, so more specific tables come first.
const KEYWORD_RULES: &[(&[&str], TransactionCategory)] = &[
    (
        &[
            "grocery", "supermarket", "whole foods", "trader joe", "safeway", "kroger", "aldi",
            "costco",
        ],
        TransactionCategory::Groceries,
    ),
    (
        &[
            "restaurant", "cafe", "coffee", "starbucks", "mcdonald", "pizza", "sushi", "diner",
            "doordash", "ubereats", "grubhub",
        ],
        TransactionCategory::Restaurants,
    ),
    (
        &["shell", "chevron", "exxon", "fuel", "gas station", "bp ", "petrol"],
        TransactionCategory::Gas,
    ),
    (
        &[
            "electric", "water bill", "internet", "comcast", "verizon", "t-mobile", "utility",
            "utilities",
        ],
        TransactionCategory::Utilities,
    ),
    (
        &["netflix", "spotify", "hulu", "cinema", "theater", "concert", "steam"],
        TransactionCategory::Entertainment,
    ),
    (
        &["pharmacy", "cvs", "walgreens", "hospital", "clinic", "dental", "doctor"],
        TransactionCategory::Medical,
    ),
    (
        &["amazon", "target", "walmart", "best buy", "mall", "store"],
        TransactionCategory::Shopping,
    ),
    (
        &["airline", "airbnb", "hotel", "flight", "delta air", "united air", "hertz"],
        TransactionCategory::Travel,
    ),
    (
        &["tuition", "university", "college", "udemy", "coursera", "school"],
        TransactionCategory::Education,
    ),
    (
        &["donation", "charity", "red cross", "gofundme"],
        TransactionCategory::Charity,
    ),
    (
        &["overdraft", "atm fee", "service fee", "interest charge", "bank fee"],
        TransactionCategory::BankFees,
    ),
    (
        &["payroll", "salary", "direct deposit", "paycheck"],
        TransactionCategory::Income,
    ),
    (
        &["transfer", "zelle", "venmo", "wire "],
        TransactionCategory::Transfer,
    ),
];

// Plaid's top-level category names, mapped onto our taxonomy.
const PROVIDER_HINT_RULES: &[(&str, TransactionCategory)] = &[
    ("food and drink", TransactionCategory::Restaurants),
    ("restaurants", TransactionCategory::Restaurants),
    ("groceries", TransactionCategory::Groceries),
    ("supermarkets and groceries", TransactionCategory::Groceries),
    ("gas stations", TransactionCategory::Gas),
    ("travel", TransactionCategory::Travel),
    ("airlines and aviation services", TransactionCategory::Travel),
    ("shops", TransactionCategory::Shopping),
    ("recreation", TransactionCategory::Entertainment),
    ("entertainment", TransactionCategory::Entertainment),
    ("healthcare", TransactionCategory::Medical),
    ("utilities", TransactionCategory::Utilities),
    ("bank fees", TransactionCategory::BankFees),
    ("interest", TransactionCategory::BankFees),
    ("payroll", TransactionCategory::Income),
    ("transfer", TransactionCategory::Transfer),
    ("education", TransactionCategory::Education),
    ("charitable giving", TransactionCategory::Charity),
];

/// Assigns a category from the provider's category hierarchy and the
/// transaction text. Falls back to `Uncategorized` when nothing matches.
pub fn categorize(
    description: &str,
    merchant_name: Option<&str>,
    provider_categories: &[String],
) -> TransactionCategory {
    for hint in provider_categories {
        let hint = hint.to_lowercase();
        for (name, category) in PROVIDER_HINT_RULES {
            if hint == *name {
                return *category;
            }
        }
    }

    let mut text = description.to_lowercase();
    if let Some(merchant) = merchant_name {
        text.push(' ');
        text.push_str(&merchant.to_lowercase());
    }

    for (keywords, category) in KEYWORD_RULES {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return *category;
        }
    }

    TransactionCategory::Uncategorized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_wins() {
        assert_eq!(
            categorize("STARBUCKS #1234", None, &[]),
            TransactionCategory::Restaurants
        );
        assert_eq!(
            categorize("POS PURCHASE", Some("Whole Foods Market"), &[]),
            TransactionCategory::Groceries
        );
    }

    #[test]
    fn provider_hint_takes_precedence() {
        let hints = vec!["Travel".to_string(), "Airlines and Aviation Services".to_string()];
        assert_eq!(
            categorize("AMAZON PRIME", None, &hints),
            TransactionCategory::Travel
        );
    }

    #[test]
    fn unknown_text_is_uncategorized() {
        assert_eq!(
            categorize("XJKQ 993 PAYMENT", None, &[]),
            TransactionCategory::Uncategorized
        );
    }
}
