//! # Currency
//!
//! Display currency for amounts. Only the symbol changes; no conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Eur,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Inr, Currency::Eur, Currency::Jpy];

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
            Currency::Eur => "€",
            Currency::Jpy => "¥",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Inr => "inr",
            Currency::Eur => "eur",
            Currency::Jpy => "jpy",
        }
    }

    /// Settings label, e.g. `USD ($)`.
    pub fn label(self) -> String {
        format!("{} ({})", self.code().to_uppercase(), self.symbol())
    }

    /// Parses a currency code; unknown codes fall back to USD.
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or_default()
    }

    /// `$60.75`
    pub fn format(self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(Currency::from_code("EUR"), Currency::Eur);
        assert_eq!(Currency::from_code(" jpy "), Currency::Jpy);
    }

    #[test]
    fn test_unknown_code_falls_back_to_usd() {
        assert_eq!(Currency::from_code("gbp"), Currency::Usd);
    }

    #[test]
    fn test_format_and_label() {
        assert_eq!(Currency::Inr.format(60.75), "₹60.75");
        assert_eq!(Currency::Usd.format(0.0), "$0.00");
        assert_eq!(Currency::Eur.label(), "EUR (€)");
    }
}
