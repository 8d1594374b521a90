//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are stored in the seller's listing currency. Shoppers pick
//! a display currency, and prices are converted with fixed reference rates
//! (there is no live FX feed).

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Convert this price into another currency using the reference rates.
    ///
    /// The result is rounded to two decimal places, midpoints away from zero.
    #[must_use]
    pub fn convert_to(self, target: CurrencyCode) -> Self {
        if self.currency_code == target {
            return self;
        }
        let usd = self.amount / self.currency_code.per_usd();
        let amount = (usd * target.per_usd())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self::new(amount, target)
    }

    /// Format for display (e.g., `"$19.99"` or `"74.96 SAR"`).
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        match self.currency_code.symbol() {
            Some(symbol) => format!("{symbol}{amount:.2}"),
            None => format!("{amount:.2} {}", self.currency_code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes supported by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    SAR,
    AED,
    EGP,
    MAD,
}

impl CurrencyCode {
    /// All supported currencies, in selector order.
    pub const ALL: [Self; 7] = [
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::SAR,
        Self::AED,
        Self::EGP,
        Self::MAD,
    ];

    /// ISO code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::SAR => "SAR",
            Self::AED => "AED",
            Self::EGP => "EGP",
            Self::MAD => "MAD",
        }
    }

    /// Prefix symbol, if the currency is conventionally shown with one.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::USD => Some("$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::SAR | Self::AED | Self::EGP | Self::MAD => None,
        }
    }

    /// Units of this currency per one US dollar.
    #[must_use]
    pub fn per_usd(self) -> Decimal {
        match self {
            Self::USD => Decimal::ONE,
            Self::EUR => Decimal::new(92, 2),
            Self::GBP => Decimal::new(79, 2),
            Self::SAR => Decimal::new(375, 2),
            Self::AED => Decimal::new(367, 2),
            Self::EGP => Decimal::new(4850, 2),
            Self::MAD => Decimal::new(1000, 2),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}
