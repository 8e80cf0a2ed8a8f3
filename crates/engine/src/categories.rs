//! The fixed category set applied to statement transactions.
//!
//! The upstream categorizer and the review UI both speak these exact
//! sixteen labels; the engine never invents new ones. Declaration order is
//! the stable ordering used wherever one is needed.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Classification label of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Transfer")]
    Transfer,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Loan Payment")]
    LoanPayment,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in stable order.
    pub const ALL: [Category; 16] = [
        Self::FoodDining,
        Self::Shopping,
        Self::Transport,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Income,
        Self::Transfer,
        Self::Investment,
        Self::LoanPayment,
        Self::Insurance,
        Self::Education,
        Self::Travel,
        Self::PersonalCare,
        Self::Groceries,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Shopping => "Shopping",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Income => "Income",
            Self::Transfer => "Transfer",
            Self::Investment => "Investment",
            Self::LoanPayment => "Loan Payment",
            Self::Insurance => "Insurance",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::Groceries => "Groceries",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| EngineError::Validation(format!("invalid category: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_each_category_once() {
        assert_eq!(Category::ALL.len(), 16);
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            Category::try_from("Food"),
            Err(EngineError::Validation("invalid category: Food".to_string()))
        );
        assert_eq!(Category::try_from("Food & Dining"), Ok(Category::FoodDining));
    }
}
