use std::fmt;

use serde::{Deserialize, Serialize};

/// Contract side of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Canonical upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surrogate key assigned by a repository when a record is first stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(pub u64);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reconciliation identity of an option contract.
///
/// Two records with the same listing, settlement date, strike and side are the
/// same contract. The strike is held by bit pattern so the identity can be hashed;
/// `-0.0` folds into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionIdentity {
    stock_listing: String,
    settlement_date: i64,
    strike_bits: u64,
    option_type: OptionType,
}

impl OptionIdentity {
    /// Build an identity from its parts.
    pub fn new(
        stock_listing: impl Into<String>,
        settlement_date: i64,
        strike_price: f64,
        option_type: OptionType,
    ) -> Self {
        let strike = if strike_price == 0.0 { 0.0 } else { strike_price };
        Self {
            stock_listing: stock_listing.into(),
            settlement_date,
            strike_bits: strike.to_bits(),
            option_type,
        }
    }

    /// Ticker symbol of the underlying.
    #[must_use]
    pub fn stock_listing(&self) -> &str {
        &self.stock_listing
    }

    /// Expiration in epoch milliseconds.
    #[must_use]
    pub const fn settlement_date(&self) -> i64 {
        self.settlement_date
    }

    /// Strike price.
    #[must_use]
    pub const fn strike_price(&self) -> f64 {
        f64::from_bits(self.strike_bits)
    }

    /// Contract side.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }
}

/// Stored option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    /// Repository id; `None` until the record has been stored.
    pub id: Option<OptionId>,
    /// Ticker symbol of the underlying.
    pub stock_listing: String,
    /// Expiration timestamp in epoch milliseconds.
    pub settlement_date: i64,
    /// Strike price.
    pub strike_price: f64,
    /// Market-implied volatility.
    pub implied_volatility: f64,
    /// Outstanding contracts.
    pub open_interest: f64,
    /// Contract side.
    pub option_type: OptionType,
}

impl OptionRecord {
    /// Reconciliation identity of this record.
    #[must_use]
    pub fn identity(&self) -> OptionIdentity {
        OptionIdentity::new(
            self.stock_listing.clone(),
            self.settlement_date,
            self.strike_price,
            self.option_type,
        )
    }

    /// Overwrite the market fields (open interest and implied volatility) from `latest`.
    ///
    /// Identity fields and the id are left untouched.
    pub const fn merge_market_data(&mut self, latest: &Self) {
        self.open_interest = latest.open_interest;
        self.implied_volatility = latest.implied_volatility;
    }
}

/// Staging object used while walking a provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTransfer {
    /// Ticker symbol of the underlying.
    pub stock_listing: String,
    /// Expiration timestamp in epoch milliseconds.
    pub settlement_date: i64,
    /// Strike price.
    pub strike_price: f64,
    /// Market-implied volatility.
    pub implied_volatility: f64,
    /// Outstanding contracts.
    pub open_interest: f64,
    /// Contract side.
    pub option_type: OptionType,
}

impl OptionTransfer {
    /// Reconciliation identity of the staged values.
    #[must_use]
    pub fn identity(&self) -> OptionIdentity {
        OptionIdentity::new(
            self.stock_listing.clone(),
            self.settlement_date,
            self.strike_price,
            self.option_type,
        )
    }
}

impl From<OptionTransfer> for OptionRecord {
    fn from(t: OptionTransfer) -> Self {
        Self {
            id: None,
            stock_listing: t.stock_listing,
            settlement_date: t.settlement_date,
            strike_price: t.strike_price,
            implied_volatility: t.implied_volatility,
            open_interest: t.open_interest,
            option_type: t.option_type,
        }
    }
}

impl From<&OptionRecord> for OptionTransfer {
    fn from(r: &OptionRecord) -> Self {
        Self {
            stock_listing: r.stock_listing.clone(),
            settlement_date: r.settlement_date,
            strike_price: r.strike_price,
            implied_volatility: r.implied_volatility,
            open_interest: r.open_interest,
            option_type: r.option_type,
        }
    }
}
