use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurrencyError {
    #[error("cannot convert a negative amount ({0})")]
    InvalidAmount(f64),

    #[error("unknown currency '{0}'; expected one of AUD, USD, EUR, CAD, GBP, CHF, NZD or JPY")]
    UnknownCurrency(String),
}

// ---------------------------------------------------------------------------
// Currency – the fixed set of supported codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Cad,
    Gbp,
    Chf,
    Nzd,
    Aud,
    Jpy,
}

impl Currency {
    /// Every supported currency in table order.
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Cad,
        Currency::Gbp,
        Currency::Chf,
        Currency::Nzd,
        Currency::Aud,
        Currency::Jpy,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Nzd => "NZD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
        }
    }

    /// Units of this currency per one US dollar.
    pub fn factor(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 0.84,
            Currency::Cad => 1.23,
            Currency::Gbp => 0.72,
            Currency::Chf => 0.92,
            Currency::Nzd => 1.41,
            Currency::Aud => 1.32,
            Currency::Jpy => 110.8,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Codes are matched exactly: upper case, no surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.code().to_string()
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert `amount` of `from` into `to` through the dollar rate.
///
/// Converting a currency into itself returns `amount` untouched.
pub fn convert(amount: f64, from: Currency, to: Currency) -> Result<f64, CurrencyError> {
    if amount < 0.0 {
        return Err(CurrencyError::InvalidAmount(amount));
    }
    if from == to {
        return Ok(amount);
    }
    Ok(exchange(amount, from, to))
}

fn exchange(amount: f64, from: Currency, to: Currency) -> f64 {
    (amount / from.factor()) * to.factor()
}

/// Reference amounts shown in the conversion table.
pub const TABLE_AMOUNTS: [f64; 9] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0];

/// Pre-computed conversions of [`TABLE_AMOUNTS`] from a base currency into
/// every other currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    pub base: Currency,
    pub targets: Vec<Currency>,
    /// `(amount, converted)` where `converted[i]` is in `targets[i]`.
    pub rows: Vec<(f64, Vec<f64>)>,
}

impl ConversionTable {
    pub fn new(base: Currency) -> Self {
        let targets: Vec<Currency> = Currency::ALL
            .into_iter()
            .filter(|c| *c != base)
            .collect();

        let rows = TABLE_AMOUNTS
            .iter()
            .map(|&amount| {
                let converted: Vec<f64> = targets
                    .iter()
                    .map(|&t| exchange(amount, base, t))
                    .collect();
                (amount, converted)
            })
            .collect();

        ConversionTable {
            base,
            targets,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_to_eur() {
        let v = convert(10.0, Currency::Usd, Currency::Eur).unwrap();
        assert!((v - 8.4).abs() < 1e-9);
    }

    #[test]
    fn same_currency_is_identity() {
        for c in Currency::ALL {
            for amount in [0.0, 1.0, 12.5, 9_999.99] {
                assert_eq!(convert(amount, c, c).unwrap(), amount);
            }
        }
    }

    #[test]
    fn round_trip_within_tolerance() {
        for a in Currency::ALL {
            for b in Currency::ALL {
                for v in [0.0, 0.01, 10.0, 1234.56] {
                    let there = convert(v, a, b).unwrap();
                    let back = convert(there, b, a).unwrap();
                    assert!((back - v).abs() <= 1e-9 * v.max(1.0), "{a}->{b}->{a} {v}");
                }
            }
        }
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert_eq!(
            convert(-1.0, Currency::Usd, Currency::Jpy),
            Err(CurrencyError::InvalidAmount(-1.0))
        );
    }

    #[test]
    fn parse_codes() {
        assert_eq!("GBP".parse::<Currency>(), Ok(Currency::Gbp));
        assert_eq!("JPY".parse::<Currency>(), Ok(Currency::Jpy));
        assert_eq!(
            " USD".parse::<Currency>(),
            Err(CurrencyError::UnknownCurrency(" USD".into()))
        );
        assert_eq!(
            "usd".parse::<Currency>(),
            Err(CurrencyError::UnknownCurrency("usd".into()))
        );
        assert!("MXN".parse::<Currency>().is_err());
    }

    #[test]
    fn table_excludes_base_and_covers_amounts() {
        let table = ConversionTable::new(Currency::Eur);
        assert_eq!(table.targets.len(), 7);
        assert!(!table.targets.contains(&Currency::Eur));
        assert_eq!(table.targets[0], Currency::Usd);
        assert_eq!(table.rows.len(), 9);
        assert_eq!(table.rows[0].0, 10.0);
        assert_eq!(table.rows[8].0, 90.0);
        assert!((table.rows[0].1[0] - 10.0 / 0.84).abs() < 1e-9);
    }
}
