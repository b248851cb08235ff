use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum DangError {
    /// No members were supplied for the round
    #[error("At least one member is required")]
    EmptyExpenses,

    /// Payer is not one of the members in the round
    #[error("Payer {0} is not part of the expense")]
    UnknownPayer(String),

    /// A member's paid amount is negative or not a finite number
    #[error("Invalid amount {amount} for member {member}")]
    NegativeAmount { member: String, amount: f64 },

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Balances did not net to zero, so the settlement left a residue
    #[error("Balances do not net to zero (residual {residual})")]
    Consistency { residual: f64 },

    #[error("Member {0} not found")]
    MemberNotFound(String),

    #[error("Member {0} already exists")]
    MemberAlreadyExists(String),

    /// Removing the member would drop money still owed to or by them
    #[error("Member {member} still has an unsettled balance of {balance:.2}")]
    UnsettledBalance { member: String, balance: f64 },

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DangError {
    /// True for errors caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DangError::EmptyExpenses
                | DangError::UnknownPayer(_)
                | DangError::NegativeAmount { .. }
                | DangError::InvalidInput(..)
        )
    }

    pub(crate) fn invalid_field(field: &str, title: &str, description: impl Into<String>) -> Self {
        DangError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }
}
