//! Column codes for the SCF full public extract.
//!
//! The extract ships ~5,333 numeric-coded columns; only the subset named here
//! is consumed downstream. Raw survey variables keep their `X`-codes, derived
//! columns get readable names. Centralizing the codes keeps the derivation and
//! modeling stages free of magic strings.

/// Race of the respondent (2 = Black/African-American).
pub const RACE: &str = "X6809";

/// Ethnicity of the respondent (5 = not Hispanic/Latino).
pub const ETHNICITY: &str = "X7004";

/// Total household income reported for the previous calendar year.
pub const INCOME: &str = "X5729";

/// Filed for bankruptcy in the past five years (1 = yes).
pub const BANKRUPTCY: &str = "X6772";

/// Had a foreclosure started against a property (1 = yes).
pub const FORECLOSURE: &str = "X3031";

/// Loan payment history (1 = always paid on time).
pub const ONTIME_PAYMENTS: &str = "X3004";

/// Credit application outcome in the past year
/// (1 = turned down, 3 = not given as much credit as requested).
pub const LOAN_DECISION: &str = "X407";

/// Income-source components summed into `totalincome`.
pub const INCOME_SOURCES: [&str; 12] = [
    "X5702", "X5704", "X5706", "X5708", "X5710", "X5712", "X5714", "X5716", "X5718", "X5720",
    "X5722", "X5724",
];

/// Asset components summed into `roughassets`: checking and savings account
/// balances, CDs, mutual funds, stocks, bonds, and retirement accounts.
pub const ASSET_SOURCES: [&str; 24] = [
    "X3506", "X3510", "X3514", "X3518", "X3522", "X3526", "X3730", "X3736", "X3742", "X3748",
    "X3754", "X3760", "X3721", "X3822", "X3824", "X3826", "X3828", "X3830", "X3915", "X3902",
    "X3906", "X3910", "X6551", "X6559",
];

/// Debt components summed into `roughdebts`: mortgage balances, lines of
/// credit, credit card balances, and education loans.
pub const DEBT_SOURCES: [&str; 11] = [
    "X805", "X905", "X1005", "X1108", "X1119", "X1130", "X413", "X421", "X424", "X427", "X7824",
];

// Derived column names.

pub const BLACK_NONLATINO: &str = "blacknonlatino";
pub const LN_INCOME: &str = "lnincome";
pub const TOTAL_INCOME: &str = "totalincome";
pub const LN_TOTAL_INCOME: &str = "lntotalincome";
pub const ROUGH_ASSETS: &str = "roughassets";
pub const ROUGH_DEBTS: &str = "roughdebts";
pub const ROUGH_NW: &str = "roughNW";
pub const LN_ROUGH_NW: &str = "lnroughNW";
pub const BANKRUPTCY_FLAG: &str = "bankruptcy";
pub const FORECLOSURE_FLAG: &str = "foreclosure";
pub const ONTIME_FLAG: &str = "ontimepayments";
pub const REJECTED: &str = "rejected";

// Survey response codes.

/// Race code for Black/African-American respondents.
pub const RACE_BLACK: i64 = 2;

/// Ethnicity code for respondents who are not Hispanic/Latino.
pub const ETHNICITY_NON_LATINO: i64 = 5;

/// Sentinel for "yes" on the bankruptcy/foreclosure/on-time questions.
pub const CODE_YES: i64 = 1;

/// Decision codes counted as a rejection: turned down outright, or granted
/// less credit than requested.
pub const DECISION_REJECTED: [i64; 2] = [1, 3];

/// Outcome and predictors of the rejection regression, outcome first.
pub const MODEL_COLUMNS: [&str; 8] = [
    REJECTED,
    BLACK_NONLATINO,
    ROUGH_ASSETS,
    ROUGH_DEBTS,
    LN_TOTAL_INCOME,
    BANKRUPTCY_FLAG,
    ONTIME_FLAG,
    FORECLOSURE_FLAG,
];

/// Columns reported in the descriptive-statistics tables.
pub const SUMMARY_COLUMNS: [&str; 10] = [
    INCOME,
    TOTAL_INCOME,
    LN_INCOME,
    ROUGH_ASSETS,
    ROUGH_DEBTS,
    ROUGH_NW,
    REJECTED,
    BANKRUPTCY_FLAG,
    FORECLOSURE_FLAG,
    ONTIME_FLAG,
];

/// Every raw column the pipeline reads. The loader validates these against
/// the parsed extract before any derivation runs.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![
        RACE,
        ETHNICITY,
        INCOME,
        BANKRUPTCY,
        FORECLOSURE,
        ONTIME_PAYMENTS,
        LOAN_DECISION,
    ];
    columns.extend_from_slice(&INCOME_SOURCES);
    columns.extend_from_slice(&ASSET_SOURCES);
    columns.extend_from_slice(&DEBT_SOURCES);
    columns
}
