/// Capital account number reserved for the general partner.
pub const GENERAL_PARTNER_NUMBER: u32 = 0;

/// Default annual fixed (management) fee rate, as a decimal string.
pub const DEFAULT_FIXED_FEE: &str = "0.02";

/// Default performance fee rate applied above the high-water mark.
pub const DEFAULT_PERFORMANCE_FEE_RATE: &str = "0.2";

/// Default number of periods between performance-fee assessments.
pub const DEFAULT_PERFORMANCE_FEE_PERIOD: u32 = 12;

/// Decimal places kept for ownership percentages.
pub const OWNERSHIP_PRECISION: u32 = 16;

/// Decimal places kept for capital account closing values derived from ownership.
pub const VALUE_PRECISION: u32 = 10;

/// Document type discriminators stored in every world-state record.
pub mod doc_types {
    pub const FUND: &str = "fund";
    pub const INVESTOR: &str = "investor";
    pub const CAPITAL_ACCOUNT: &str = "capitalAccount";
    pub const CAPITAL_ACCOUNT_ACTION: &str = "capitalAccountAction";
    pub const PORTFOLIO: &str = "portfolio";
    pub const PORTFOLIO_ACTION: &str = "portfolioAction";
    pub const BENCHMARK: &str = "benchmark";
}

/// Name of the discriminator field carried by every stored document.
pub const DOC_TYPE_FIELD: &str = "docType";
