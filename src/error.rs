use crate::core::member::MemberId;
use crate::core::money::Money;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by the ledger.
///
/// `InvalidSplit` is a caller-recoverable rejection of one expense;
/// retrying the same input cannot succeed, the expense has to be fixed.
/// `UnsettleableInput` signals an upstream contract violation (balances
/// that do not sum to zero) and should be treated as an internal error,
/// not shown to end users as actionable.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid split in expense {expense_id}: {violation}")]
    InvalidSplit {
        expense_id: Uuid,
        violation: SplitViolation,
    },

    #[error(
        "net balances do not sum to zero (credit {credit}, debit {debit}): \
         upstream balance computation is inconsistent"
    )]
    UnsettleableInput { credit: Money, debit: Money },
}

impl LedgerError {
    pub(crate) fn invalid_split(expense_id: Uuid, violation: SplitViolation) -> Self {
        Self::InvalidSplit {
            expense_id,
            violation,
        }
    }
}

/// The specific way an expense's splits failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitViolation {
    #[error("references member {0} outside the group")]
    UnknownMember(MemberId),

    #[error("member {0} appears more than once")]
    DuplicateMember(MemberId),

    #[error("negative amount {amount} for member {member}")]
    NegativeAmount { member: MemberId, amount: Money },

    #[error("negative percentage {percentage} for member {member}")]
    NegativePercentage {
        member: MemberId,
        percentage: Decimal,
    },

    #[error("missing amount for member {0} in an exact split")]
    MissingAmount(MemberId),

    #[error("missing percentage for member {0} in a percentage split")]
    MissingPercentage(MemberId),

    #[error("percentages sum to {sum}, expected 100")]
    PercentageSum { sum: Decimal },

    #[error("split amounts sum to {sum}, expense total is {total}")]
    AmountSum { sum: Money, total: Money },

    #[error("no split entries for a non-zero expense")]
    Empty,
}
