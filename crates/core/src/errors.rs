//! Core error types for the fund ledger.
//!
//! Every engine entry point returns [`Result`]. Errors are typed by kind so the
//! calling layer can map them onto its own responses; the engine never retries
//! and never commits a partial write set when one of these is returned.

use chrono::ParseError as ChronoParseError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::Period;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger.
#[derive(Error, Debug)]
pub enum Error {
    #[error("World state operation failed: {0}")]
    State(#[from] StateError),

    #[error("An object already exists with id '{0}'")]
    IdAlreadyInUse(String),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Lifecycle transition rejected: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Ledger invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

/// Coarse classification of an [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    InvariantViolation,
    StoreFailure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::State(_) => ErrorKind::StoreFailure,
            Error::IdAlreadyInUse(_) => ErrorKind::Conflict,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Validation(_) | Error::Lifecycle(_) => ErrorKind::Validation,
            Error::Invariant(_) => ErrorKind::InvariantViolation,
        }
    }
}

/// Failures of the world-state store or of the entity codec sitting on top of it.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Error retrieving the world state for key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Error writing the world state for key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("World state query failed: {0}")]
    QueryFailed(String),

    #[error("World state commit failed: {0}")]
    CommitFailed(String),

    #[error("Failed to encode or decode a stored document: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Document '{key}' has docType '{found}', expected '{expected}'")]
    DocTypeMismatch {
        key: String,
        expected: String,
        found: String,
    },
}

/// A referenced record does not exist.
#[derive(Error, Debug)]
pub enum NotFoundError {
    #[error("a fund with id '{0}' does not exist")]
    Fund(String),

    #[error("an investor with id '{0}' does not exist")]
    Investor(String),

    #[error("a capital account with id '{0}' does not exist")]
    CapitalAccount(String),

    #[error("a portfolio with id '{0}' does not exist")]
    Portfolio(String),

    #[error("a benchmark with id '{0}' does not exist")]
    Benchmark(String),

    #[error("no portfolios found for fund '{0}'")]
    NoPortfoliosFound(String),

    #[error("no capital accounts found for fund '{0}'")]
    NoCapitalAccountsFound(String),

    #[error("portfolio '{portfolio_id}' has no position snapshot on {date}")]
    PositionSnapshot {
        portfolio_id: String,
        date: chrono::NaiveDate,
    },

    #[error("portfolio '{portfolio_id}' holds no '{asset}' on {date}")]
    Position {
        portfolio_id: String,
        asset: String,
        date: chrono::NaiveDate,
    },
}

/// Malformed or policy-violating input, rejected before touching any balance.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("the specified type '{0}' is invalid for a capital account action")]
    InvalidCapitalAccountActionType(String),

    #[error("the specified type '{0}' is invalid for a portfolio action")]
    InvalidPortfolioActionType(String),

    #[error("capital account '{account_id}' has performance fees and cannot accept a deposit in mid-year period {period}")]
    MidYearDeposit { account_id: String, period: Period },

    #[error("period {period} is already closed for capital account '{account_id}' (current period {current_period})")]
    ActionPeriodClosed {
        account_id: String,
        period: Period,
        current_period: Period,
    },

    #[error("portfolio '{portfolio_id}' already has activity on {most_recent}; an action dated {date} cannot be applied")]
    OutOfOrderPortfolioAction {
        portfolio_id: String,
        date: chrono::NaiveDate,
        most_recent: chrono::NaiveDate,
    },

    #[error("capital account '{account_id}' does not belong to fund '{fund_id}'")]
    CapitalAccountNotInFund { account_id: String, fund_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

/// A period transition requested from the wrong lifecycle state.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("fund '{fund_id}' is at period {period} and cannot be bootstrapped")]
    CannotBootstrapFund { fund_id: String, period: Period },

    #[error("fund '{0}' has not been bootstrapped and cannot be stepped")]
    CannotStepFund(String),

    #[error("capital account '{account_id}' is at period {period} and cannot be bootstrapped")]
    CannotBootstrapCapitalAccount { account_id: String, period: Period },
}

/// An arithmetic or structural invariant of the ledger would be broken.
#[derive(Error, Debug)]
pub enum InvariantError {
    #[error("the actions resulted in a negative balance of {balance} for capital account '{account_id}' in period {period}")]
    NegativeCapitalAccountBalance {
        account_id: String,
        period: Period,
        balance: Decimal,
    },

    #[error("wealth conservation failed for fund '{fund_id}' in period {period}: {closing_value} - {fixed_fees} + {deposits} != {opening_value}")]
    WealthConservation {
        fund_id: String,
        period: Period,
        closing_value: Decimal,
        fixed_fees: Decimal,
        deposits: Decimal,
        opening_value: Decimal,
    },

    #[error("capital account '{account_id}' has no ownership percentage for period {period}")]
    PreviousOwnershipPercentageNotFound { account_id: String, period: Period },

    #[error("fund '{0}' has no general partner account")]
    GeneralPartnerNotFound(String),

    #[error("fund '{fund_id}' has a zero opening value in period {period}; ownership is undefined")]
    ZeroFundOpeningValue { fund_id: String, period: Period },

    #[error("capital account '{account_id}' is at period {account_period} but its fund is at period {fund_period}")]
    CapitalAccountPeriodMismatch {
        account_id: String,
        account_period: Period,
        fund_period: Period,
    },

    #[error("cannot sell a security from empty portfolio '{0}'")]
    EmptyPortfolio(String),

    #[error("selling {amount} of '{asset}' would leave a negative position in portfolio '{portfolio_id}'")]
    NegativeSecurityAmount {
        portfolio_id: String,
        asset: String,
        amount: Decimal,
    },

    #[error("portfolio '{0}' has no most recent date")]
    NoMostRecentDateForPortfolio(String),

    #[error("portfolio '{portfolio_id}' has no valuations for {date}")]
    NoValuationsFoundForDate {
        portfolio_id: String,
        date: chrono::NaiveDate,
    },

    #[error("arithmetic overflow while computing {0}")]
    ArithmeticOverflow(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::State(StateError::Codec(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
