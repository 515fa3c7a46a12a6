use chrono::{Datelike, Duration, NaiveDateTime, Utc};

use crate::transactions::DateRange;

/// What the user is asking for, derived from keyword matching.
/// No NLP here; the first matching bucket wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    NetWorth,
    AccountSummary,
    SpendingSummary,
    BudgetStatus,
    TransactionSearch,
    FinancialAdvice,
    GoalProgress,
    CategoryAnalysis,
    GeneralChat,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::NetWorth => "net_worth",
            Intent::AccountSummary => "account_summary",
            Intent::SpendingSummary => "spending_summary",
            Intent::BudgetStatus => "budget_status",
            Intent::TransactionSearch => "transaction_search",
            Intent::FinancialAdvice => "financial_advice",
            Intent::GoalProgress => "goal_progress",
            Intent::CategoryAnalysis => "category_analysis",
            Intent::GeneralChat => "general_chat",
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

pub fn detect_intent(query: &str) -> Intent {
    let q = query.to_lowercase();

    if contains_any(&q, &["net worth", "worth", "assets", "liabilities"]) {
        Intent::NetWorth
    } else if contains_any(&q, &["account", "accounts", "balance", "balances"]) {
        Intent::AccountSummary
    } else if contains_any(&q, &["spend", "spent", "spending", "expense"]) {
        Intent::SpendingSummary
    } else if contains_any(&q, &["budget", "budgets", "remaining"]) {
        Intent::BudgetStatus
    } else if contains_any(&q, &["find", "search", "show me", "transactions"]) {
        Intent::TransactionSearch
    } else if contains_any(&q, &["advice", "recommend", "suggest", "should i"]) {
        Intent::FinancialAdvice
    } else if contains_any(&q, &["goal", "goals", "save", "saving"]) {
        Intent::GoalProgress
    } else if contains_any(&q, &["category", "categories", "groceries", "restaurants"]) {
        Intent::CategoryAnalysis
    } else {
        Intent::GeneralChat
    }
}

/// Time window referenced in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    ThisMonth,
    LastMonth,
    ThisWeek,
    LastWeek,
    ThisYear,
    LastYear,
    Last30Days,
}

impl TimePeriod {
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::ThisMonth => "this month",
            TimePeriod::LastMonth => "last month",
            TimePeriod::ThisWeek => "this week",
            TimePeriod::LastWeek => "last week",
            TimePeriod::ThisYear => "this year",
            TimePeriod::LastYear => "last year",
            TimePeriod::Last30Days => "last 30 days",
        }
    }

    pub fn date_range_from(&self, now: NaiveDateTime) -> DateRange {
        let today = now.date();
        let midnight = |d: chrono::NaiveDate| d.and_hms_opt(0, 0, 0).expect("midnight is valid");
        let (start, end) = match self {
            TimePeriod::ThisMonth => {
                (midnight(today.with_day(1).expect("first of month")), now)
            }
            TimePeriod::LastMonth => {
                let first_of_this_month = today.with_day(1).expect("first of month");
                let last_of_previous = first_of_this_month - Duration::days(1);
                (
                    midnight(last_of_previous.with_day(1).expect("first of month")),
                    midnight(last_of_previous)
                        + Duration::hours(23)
                        + Duration::minutes(59)
                        + Duration::seconds(59),
                )
            }
            TimePeriod::ThisWeek => {
                let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (midnight(start), now)
            }
            TimePeriod::LastWeek => {
                let start = today
                    - Duration::days(today.weekday().num_days_from_monday() as i64 + 7);
                (
                    midnight(start),
                    midnight(start) + Duration::days(6) + Duration::seconds(86399),
                )
            }
            TimePeriod::ThisYear => (
                midnight(today.with_month(1).and_then(|d| d.with_day(1)).expect("jan 1")),
                now,
            ),
            TimePeriod::LastYear => {
                let jan1 = chrono::NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).expect("jan 1");
                let dec31 = chrono::NaiveDate::from_ymd_opt(today.year() - 1, 12, 31)
                    .expect("dec 31");
                (midnight(jan1), midnight(dec31) + Duration::seconds(86399))
            }
            TimePeriod::Last30Days => (now - Duration::days(30), now),
        };
        DateRange {
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range_from(Utc::now().naive_utc())
    }
}

pub fn extract_time_period(query: &str) -> TimePeriod {
    let q = query.to_lowercase();
    if q.contains("last month") || q.contains("previous month") {
        TimePeriod::LastMonth
    } else if q.contains("this month") || q.contains("current month") {
        TimePeriod::ThisMonth
    } else if q.contains("last week") {
        TimePeriod::LastWeek
    } else if q.contains("this week") {
        TimePeriod::ThisWeek
    } else if q.contains("last year") {
        TimePeriod::LastYear
    } else if q.contains("this year") {
        TimePeriod::ThisYear
    } else {
        TimePeriod::Last30Days
    }
}

const STOP_WORDS: [&str; 14] = [
    "show", "me", "find", "search", "for", "transactions", "at", "from", "in", "the", "a", "an",
    "all", "my",
];

/// Pulls candidate search terms out of a free-text query.
pub fn extract_search_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn intent_keywords_route_as_expected() {
        assert_eq!(detect_intent("What's my net worth?"), Intent::NetWorth);
        assert_eq!(detect_intent("how much did I spend"), Intent::SpendingSummary);
        assert_eq!(detect_intent("am I over budget"), Intent::BudgetStatus);
        assert_eq!(detect_intent("find starbucks charges"), Intent::TransactionSearch);
        assert_eq!(detect_intent("how are my goals doing"), Intent::GoalProgress);
        assert_eq!(detect_intent("hello there"), Intent::GeneralChat);
    }

    #[test]
    fn net_worth_outranks_account_keywords() {
        assert_eq!(
            detect_intent("net worth across my accounts"),
            Intent::NetWorth
        );
    }

    #[test]
    fn last_month_range_covers_whole_month() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let range = TimePeriod::LastMonth.date_range_from(now);
        assert_eq!(
            range.start_date.unwrap().date(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
        assert_eq!(
            range.end_date.unwrap().date(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn search_terms_drop_stop_words() {
        let terms = extract_search_terms("show me all transactions at Starbucks");
        assert_eq!(terms, vec!["starbucks".to_string()]);
    }
}
