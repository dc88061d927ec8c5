use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::transaction::{PartialDraft, TransactionDraft, TransactionType, parse_amount};

/// A one-tap transaction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub name: &'static str,
    pub transaction_type: TransactionType,
    pub category: &'static str,
    pub description: &'static str,
    /// Fixed amount in cents; `None` asks the user.
    pub amount_cents: Option<i64>,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        name: "sale",
        transaction_type: TransactionType::Income,
        category: "Sales",
        description: "Quick Sale",
        amount_cents: None,
    },
    QuickAction {
        name: "inventory",
        transaction_type: TransactionType::Expense,
        category: "Inventory",
        description: "Inventory Purchase",
        amount_cents: None,
    },
    QuickAction {
        name: "coffee",
        transaction_type: TransactionType::Expense,
        category: "Utilities",
        description: "Coffee/Tea",
        amount_cents: Some(500),
    },
    QuickAction {
        name: "transport",
        transaction_type: TransactionType::Expense,
        category: "Transportation",
        description: "Transportation",
        amount_cents: None,
    },
    QuickAction {
        name: "marketing",
        transaction_type: TransactionType::Expense,
        category: "Marketing",
        description: "Marketing Expense",
        amount_cents: None,
    },
];

pub fn find_quick_action(name: &str) -> Option<&'static QuickAction> {
    QUICK_ACTIONS
        .iter()
        .find(|action| action.name.eq_ignore_ascii_case(name.trim()))
}

impl QuickAction {
    pub fn fixed_amount(&self) -> Option<Decimal> {
        self.amount_cents.map(|cents| Decimal::new(cents, 2))
    }

    /// Builds a draft dated `today`. A fixed amount ignores `amount_input`;
    /// otherwise the input must be a number above zero.
    pub fn draft(&self, amount_input: Option<&str>, today: NaiveDate) -> Result<TransactionDraft, ValidationError> {
        let amount = match self.fixed_amount() {
            Some(amount) => amount,
            None => {
                let input = amount_input
                    .map(str::trim)
                    .filter(|input| !input.is_empty())
                    .ok_or(ValidationError::MissingField("amount"))?;
                let amount = parse_amount(input)?;
                if amount <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveAmount);
                }
                amount
            }
        };

        let mut draft = TransactionDraft::dated(today);
        draft.apply(PartialDraft {
            transaction_type: Some(self.transaction_type),
            amount: Some(amount.to_string()),
            description: Some(self.description.to_string()),
            category: Some(self.category.to_string()),
            ..PartialDraft::default()
        });
        Ok(draft)
    }
}
