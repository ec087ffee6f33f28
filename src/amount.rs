//! Monetary amounts in satoshis and their rendering in BCH denominations.

use std::fmt;
use std::ops::Neg;

pub const SATOSHI_PER_BCH: i64 = 1_0000_0000;
pub const MAX_SATOSHI: i64 = 21_000_000 * SATOSHI_PER_BCH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountError {
    /// The floating point value is NaN or infinite.
    InvalidAmount,
    /// The value lies outside `{-MAX_SATOSHI..MAX_SATOSHI}`.
    OutOfRange(i64),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::InvalidAmount => write!(f, "invalid bitcoin amount"),
            AmountError::OutOfRange(sat) => {
                write!(f, "amount of {} satoshi is out of range", sat)
            }
        }
    }
}

impl std::error::Error for AmountError {}

/// Denomination of an amount, identified by its power of ten relative to one BCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUnit {
    MegaBch,
    KiloBch,
    Bch,
    MilliBch,
    MicroBch,
    Satoshi,
}

impl AmountUnit {
    pub const fn exponent(self) -> i32 {
        match self {
            AmountUnit::MegaBch => 6,
            AmountUnit::KiloBch => 3,
            AmountUnit::Bch => 0,
            AmountUnit::MilliBch => -3,
            AmountUnit::MicroBch => -6,
            AmountUnit::Satoshi => -8,
        }
    }

    /// Number of fractional digits a value in this unit can carry.
    const fn decimals(self) -> u32 {
        (self.exponent() + 8) as u32
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AmountUnit::MegaBch => "MBCH",
            AmountUnit::KiloBch => "kBCH",
            AmountUnit::Bch => "BCH",
            AmountUnit::MilliBch => "mBCH",
            AmountUnit::MicroBch => "μBCH",
            AmountUnit::Satoshi => "Satoshi",
        })
    }
}

/// A signed amount of satoshis.
///
/// The range `{-MAX_SATOSHI..MAX_SATOSHI}` is checked by the fallible constructors
/// and the checked arithmetic, but not by [`Amount::from_sat`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_sat(sat: i64) -> Self {
        Amount(sat)
    }

    /// Returns an error if the amount is outside the range `{-MAX_SATOSHI..MAX_SATOSHI}`.
    pub fn from_i64(sat: i64) -> Result<Self, AmountError> {
        if (-MAX_SATOSHI..=MAX_SATOSHI).contains(&sat) {
            Ok(Amount(sat))
        } else {
            Err(AmountError::OutOfRange(sat))
        }
    }

    /// Converts a floating point number of BCH, rounding to the nearest satoshi.
    pub fn from_bch(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::InvalidAmount);
        }
        let sat = (value * SATOSHI_PER_BCH as f64).round();
        if sat.abs() > MAX_SATOSHI as f64 {
            return Err(AmountError::OutOfRange(sat as i64));
        }
        Ok(Amount(sat as i64))
    }

    pub const fn to_sat(self) -> i64 {
        self.0
    }

    /// Lossy conversion to a floating point number of BCH.
    pub fn to_bch(self) -> f64 {
        self.to_unit(AmountUnit::Bch)
    }

    pub fn to_unit(self, unit: AmountUnit) -> f64 {
        self.0 as f64 / 10f64.powi(unit.exponent() + 8)
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0
            .checked_add(rhs.0)
            .and_then(|sat| Amount::from_i64(sat).ok())
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0
            .checked_sub(rhs.0)
            .and_then(|sat| Amount::from_i64(sat).ok())
    }

    /// Exact decimal rendering in `unit` with trailing zeros dropped, followed by the unit.
    pub fn format(self, unit: AmountUnit) -> String {
        let decimals = unit.decimals();
        let scale = 10u64.pow(decimals);
        let sat = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };

        let whole = sat / scale;
        let frac = sat % scale;
        if frac == 0 {
            return format!("{}{} {}", sign, whole, unit);
        }

        let digits = format!("{:0width$}", frac, width = decimals as usize);
        format!("{}{}.{} {}", sign, whole, digits.trim_end_matches('0'), unit)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(AmountUnit::Bch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Amount::ZERO.to_string(), "0 BCH");
        assert_eq!(Amount::from_sat(100_000_000).to_string(), "1 BCH");
        assert_eq!(Amount::from_sat(100_000).to_string(), "0.001 BCH");
        assert_eq!(Amount::from_sat(1).to_string(), "0.00000001 BCH");
        assert_eq!(Amount::from_sat(-150_000_000).to_string(), "-1.5 BCH");
    }

    #[test]
    fn test_from_bch() {
        assert_eq!(Amount::from_bch(1.0).unwrap().to_string(), "1 BCH");
        assert_eq!(
            Amount::from_bch(0.01234567).unwrap().to_string(),
            "0.01234567 BCH"
        );
        assert_eq!(Amount::from_bch(0.0).unwrap(), Amount::ZERO);
        // rounds to the nearest satoshi
        assert_eq!(Amount::from_bch(0.000000016).unwrap().to_sat(), 2);
        assert_eq!(Amount::from_bch(-0.000000014).unwrap().to_sat(), -1);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Amount::from_bch(bad).unwrap_err();
            assert_eq!(err, AmountError::InvalidAmount);
            assert_eq!(err.to_string(), "invalid bitcoin amount");
        }
        assert!(matches!(
            Amount::from_bch(21_000_001.0),
            Err(AmountError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_unit_conversions() {
        let amount = Amount::from_sat(44433322211100);

        assert_eq!(amount.format(AmountUnit::KiloBch), "444.333222111 kBCH");
        assert_eq!(amount.to_string(), "444333.222111 BCH");
        assert_eq!(amount.format(AmountUnit::MilliBch), "444333222.111 mBCH");
        assert_eq!(amount.format(AmountUnit::MicroBch), "444333222111 μBCH");
        assert_eq!(amount.format(AmountUnit::Satoshi), "44433322211100 Satoshi");
        assert_eq!(amount.format(AmountUnit::MegaBch), "0.444333222111 MBCH");

        assert_eq!(amount.to_unit(AmountUnit::Satoshi), 44433322211100.0);
        assert_eq!(Amount::from_sat(150_000_000).to_bch(), 1.5);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Amount::from_i64(MAX_SATOSHI).unwrap();
        let one = Amount::from_sat(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!((-max).checked_sub(one), None);
        assert_eq!(
            one.checked_add(one).and_then(|a| a.checked_sub(one)),
            Some(one)
        );
        assert_eq!(Amount::from_sat(i64::MAX).checked_add(one), None);
        assert!(Amount::from_i64(MAX_SATOSHI + 1).is_err());
        assert!(Amount::from_i64(-MAX_SATOSHI).is_ok());
    }
}
