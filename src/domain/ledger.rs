use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::{Amount, AmountOverflow, Transaction, checked_add};

/// Income/expense totals over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub net_savings: Amount,
}

/// Summed expenses for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Oldest first
    Date,
    /// Alphabetical by category name
    Category,
    /// Largest first
    Amount,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Category => "category",
            SortKey::Amount => "amount",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "category" => Ok(SortKey::Category),
            "amount" => Ok(SortKey::Amount),
            _ => Err(ParseSortKeyError(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(pub String);

impl fmt::Display for ParseSortKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected date, category or amount)",
            self.0
        )
    }
}

impl std::error::Error for ParseSortKeyError {}

/// In-memory ordered collection of transactions.
/// Stored order is insertion order; sorting always works on a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn extend(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.extend(transactions);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Income and expense totals. Fails if a total does not fit in an `Amount`.
    pub fn summary(&self) -> Result<Summary, AmountOverflow> {
        let mut total_income = Amount::ZERO;
        let mut total_expenses = Amount::ZERO;

        for t in &self.transactions {
            let total = if t.is_income() {
                &mut total_income
            } else {
                &mut total_expenses
            };
            *total = checked_add(*total, t.amount)?;
        }

        let net_savings = total_income
            .checked_sub(total_expenses)
            .ok_or(AmountOverflow)?;

        Ok(Summary {
            total_income,
            total_expenses,
            net_savings,
        })
    }

    /// Expense totals per category, in order of each category's first expense.
    pub fn category_expense_totals(&self) -> Result<Vec<CategoryTotal>, AmountOverflow> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();

        for t in self.transactions.iter().filter(|t| t.is_expense()) {
            match index.get(t.category.as_str()) {
                Some(&i) => totals[i].total = checked_add(totals[i].total, t.amount)?,
                None => {
                    index.insert(t.category.as_str(), totals.len());
                    totals.push(CategoryTotal {
                        category: t.category.clone(),
                        total: t.amount,
                    });
                }
            }
        }

        Ok(totals)
    }

    /// Return a sorted copy. The sort is stable, so equal keys keep insertion order.
    pub fn sorted(&self, by: SortKey) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        match by {
            SortKey::Date => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            SortKey::Category => sorted.sort_by(|a, b| a.category.cmp(&b.category)),
            SortKey::Amount => sorted.sort_by(|a, b| b.amount.cmp(&a.amount)),
        }
        sorted
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::TransactionKind;

    fn make_transaction(
        description: &str,
        cents: i64,
        kind: TransactionKind,
        category: &str,
        day: u32,
    ) -> Transaction {
        Transaction::new(
            description,
            Decimal::new(cents, 2),
            kind,
            category,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(make_transaction("Coffee", 450, TransactionKind::Expense, "Food", 5));
        ledger.add(make_transaction("Salary", 200000, TransactionKind::Income, "Work", 1));
        ledger.add(make_transaction("Bus", 275, TransactionKind::Expense, "Transport", 3));
        ledger.add(make_transaction("Lunch", 1200, TransactionKind::Expense, "Food", 4));
        ledger
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(
            ledger.summary().unwrap(),
            Summary {
                total_income: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                net_savings: Decimal::ZERO,
            }
        );
        assert!(ledger.category_expense_totals().unwrap().is_empty());
        assert!(ledger.sorted(SortKey::Date).is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let ledger = sample_ledger();
        let descriptions: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Coffee", "Salary", "Bus", "Lunch"]);
    }

    #[test]
    fn test_summary() {
        let summary = sample_ledger().summary().unwrap();

        assert_eq!(summary.total_income, Decimal::new(200000, 2));
        assert_eq!(summary.total_expenses, Decimal::new(1925, 2)); // 4.50 + 2.75 + 12.00
        assert_eq!(summary.net_savings, Decimal::new(198075, 2));
    }

    #[test]
    fn test_summary_can_go_negative() {
        let mut ledger = Ledger::new();
        ledger.add(make_transaction("Rent", 90000, TransactionKind::Expense, "Home", 1));
        ledger.add(make_transaction("Gift", 5000, TransactionKind::Income, "Misc", 2));

        assert_eq!(ledger.summary().unwrap().net_savings, Decimal::new(-85000, 2));
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let totals = sample_ledger().category_expense_totals().unwrap();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Food".to_string(),
                    total: Decimal::new(1650, 2),
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    total: Decimal::new(275, 2),
                },
            ]
        );
    }

    #[test]
    fn test_category_totals_skip_income_only_categories() {
        let totals = sample_ledger().category_expense_totals().unwrap();
        assert!(totals.iter().all(|c| c.category != "Work"));
    }

    #[test]
    fn test_category_totals_sum_to_total_expenses() {
        let ledger = sample_ledger();
        let sum: Amount = ledger
            .category_expense_totals()
            .unwrap()
            .iter()
            .map(|c| c.total)
            .sum();
        assert_eq!(sum, ledger.summary().unwrap().total_expenses);
    }

    #[test]
    fn test_category_names_are_case_sensitive() {
        let mut ledger = Ledger::new();
        ledger.add(make_transaction("A", 100, TransactionKind::Expense, "food", 1));
        ledger.add(make_transaction("B", 100, TransactionKind::Expense, "Food", 1));

        assert_eq!(ledger.category_expense_totals().unwrap().len(), 2);
    }

    fn with_amount(
        description: &str,
        amount: Amount,
        kind: TransactionKind,
        category: &str,
    ) -> Transaction {
        Transaction::new(
            description,
            amount,
            kind,
            category,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_summary_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.add(with_amount("Jackpot", Decimal::MAX, TransactionKind::Income, "Luck"));
        ledger.add(with_amount("Jackpot", Decimal::MAX, TransactionKind::Income, "Luck"));

        assert_eq!(ledger.summary(), Err(AmountOverflow));
    }

    #[test]
    fn test_net_savings_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.add(with_amount("Jackpot", Decimal::MAX, TransactionKind::Income, "Luck"));
        ledger.add(with_amount("Refund", Decimal::NEGATIVE_ONE, TransactionKind::Expense, "Shop"));

        assert_eq!(ledger.summary(), Err(AmountOverflow));
    }

    #[test]
    fn test_category_totals_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.add(with_amount("Yacht", Decimal::MAX, TransactionKind::Expense, "Boats"));
        ledger.add(with_amount("Another", Decimal::MAX, TransactionKind::Expense, "Boats"));

        assert_eq!(ledger.category_expense_totals(), Err(AmountOverflow));

        // Same amounts spread over two categories still fit
        let mut ledger = Ledger::new();
        ledger.add(with_amount("Yacht", Decimal::MAX, TransactionKind::Expense, "Boats"));
        ledger.add(with_amount("Jet", Decimal::MAX, TransactionKind::Expense, "Planes"));
        assert_eq!(ledger.category_expense_totals().map(|t| t.len()), Ok(2));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("date".parse::<SortKey>(), Ok(SortKey::Date));
        assert_eq!(" Category ".parse::<SortKey>(), Ok(SortKey::Category));
        assert_eq!("AMOUNT".parse::<SortKey>(), Ok(SortKey::Amount));
        assert_eq!(
            "name".parse::<SortKey>(),
            Err(ParseSortKeyError("name".to_string()))
        );
    }

    #[test]
    fn test_sorted_by_date() {
        let sorted = sample_ledger().sorted(SortKey::Date);
        assert!(sorted.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(sorted[0].description, "Salary");
    }

    #[test]
    fn test_sorted_by_category() {
        let sorted = sample_ledger().sorted(SortKey::Category);
        assert!(sorted.windows(2).all(|w| w[0].category <= w[1].category));
        // Stable: Coffee was added before Lunch
        let food: Vec<&str> = sorted
            .iter()
            .filter(|t| t.category == "Food")
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(food, vec!["Coffee", "Lunch"]);
    }

    #[test]
    fn test_sorted_by_amount_descending() {
        let sorted = sample_ledger().sorted(SortKey::Amount);
        assert!(sorted.windows(2).all(|w| w[0].amount >= w[1].amount));
        assert_eq!(sorted[0].description, "Salary");
        assert_eq!(sorted[3].description, "Bus");
    }

    #[test]
    fn test_sorted_does_not_mutate_ledger() {
        let ledger = sample_ledger();
        let before = ledger.clone();

        for key in [SortKey::Date, SortKey::Category, SortKey::Amount] {
            let _ = ledger.sorted(key);
        }

        assert_eq!(ledger, before);
    }
}
