use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const MAX_DESCRIPTION_LEN: usize = 255;
const MAX_CATEGORY_LEN: usize = 50;

/// Amounts are stored as JSON numbers, so they are kept to cents and below
/// this ceiling where every value survives the float encoding exactly.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);
pub const MAX_AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ValidationError::InvalidTransactionType(s.trim().to_string())),
        }
    }
}

/// One recorded financial event.
///
/// The serialized form is the layout of the persistent slot:
/// `{id, amount, description, category, date, type, imageUrl?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Transaction {
    pub fn new(id: String, date: NaiveDate, description: String, amount: Decimal, transaction_type: TransactionType, category: String) -> Self {
        Self {
            id,
            amount,
            description,
            category,
            date,
            transaction_type,
            image_url: None,
        }
    }

    /// The amount with the sign its kind contributes to profit.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Fields of a transaction as typed by the user, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub transaction_type: String,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub image_url: Option<String>,
}

/// A draft that passed validation and only lacks an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub image_url: Option<String>,
}

impl ValidDraft {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            transaction_type: self.transaction_type,
            image_url: self.image_url,
        }
    }
}

/// Candidate field values from a capture adapter or a preset.
///
/// Every field is optional; see [`TransactionDraft::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDraft {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub image_url: Option<String>,
}

impl PartialDraft {
    pub fn is_empty(&self) -> bool {
        *self == PartialDraft::default()
    }
}

impl TransactionDraft {
    /// An income draft dated `today`, which is how an empty form starts.
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            transaction_type: TransactionType::Income.as_str().to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Overwrites the fields present in `partial`, keeping the rest.
    pub fn apply(&mut self, partial: PartialDraft) {
        if let Some(transaction_type) = partial.transaction_type {
            self.transaction_type = transaction_type.as_str().to_string();
        }
        if let Some(amount) = partial.amount {
            self.amount = amount;
        }
        if let Some(description) = partial.description {
            self.description = description;
        }
        if let Some(category) = partial.category {
            self.category = category;
        }
        if let Some(date) = partial.date {
            self.date = date;
        }
        if partial.image_url.is_some() {
            self.image_url = partial.image_url;
        }
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let amount_input = self.amount.trim();
        if amount_input.is_empty() {
            return Err(ValidationError::MissingField("amount"));
        }
        let amount = check_amount(parse_amount(amount_input)?)?;

        if self.transaction_type.trim().is_empty() {
            return Err(ValidationError::MissingField("type"));
        }
        let transaction_type = TransactionType::from_str(&self.transaction_type)?;

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(ValidationError::CategoryTooLong);
        }

        let date_input = self.date.trim();
        if date_input.is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        let date = NaiveDate::parse_from_str(date_input, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_input.to_string()))?;

        let image_url = self
            .image_url
            .as_ref()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(ValidDraft {
            amount,
            description,
            category,
            date,
            transaction_type,
            image_url,
        })
    }
}

/// Parses a user supplied amount. A leading `$` is tolerated.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    Decimal::from_str(digits).map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))
}

/// Checks that a parsed amount can be recorded and stored without loss.
pub fn check_amount(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount);
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(ValidationError::AmountTooPrecise);
    }
    if amount >= MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}
