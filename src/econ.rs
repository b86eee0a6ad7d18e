// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Token amounts, held as an integer number of nano units.
//!
//! The human form is a decimal number of whole tokens, e.g. `"0.05"`, and it is
//! what serde reads and writes so that scenario files and JSON output stay legible.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Nano units in one whole token.
pub const NANO_PER_TOKEN: u64 = 1_000_000_000;

const DECIMALS: usize = 9;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a decimal number: {0}")]
    NotANumber(String),
    #[error("amount {0} has more than 9 decimal places")]
    TooPrecise(String),
    #[error("amount {0} is negative")]
    Negative(String),
}

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(BigInt);

impl TokenAmount {
    pub fn from_nano(nano: impl Into<BigInt>) -> Self {
        Self(nano.into())
    }

    pub fn from_whole(tokens: impl Into<BigInt>) -> Self {
        Self(tokens.into() * NANO_PER_TOKEN)
    }

    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Parses a non-negative decimal amount of whole tokens.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        let decimal = BigDecimal::from_str(trimmed)
            .map_err(|_| ParseError::NotANumber(trimmed.to_owned()))?;
        if decimal.is_negative() {
            return Err(ParseError::Negative(trimmed.to_owned()));
        }
        let scaled = decimal * BigDecimal::from(NANO_PER_TOKEN);
        if !scaled.is_integer() {
            return Err(ParseError::TooPrecise(trimmed.to_owned()));
        }
        let (nano, _) = scaled.with_scale(0).into_bigint_and_exponent();
        Ok(Self(nano))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        let whole = &abs / NANO_PER_TOKEN;
        let frac = &abs % NANO_PER_TOKEN;
        if frac.is_zero() {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{:0>width$}", frac.to_string(), width = DECIMALS);
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({self})")
    }
}

impl FromStr for TokenAmount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Whole(u64),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Whole(n) => Ok(Self::from_whole(n)),
        }
    }
}

impl Add for TokenAmount {
    type Output = TokenAmount;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&TokenAmount> for &TokenAmount {
    type Output = TokenAmount;
    fn add(self, rhs: &TokenAmount) -> Self::Output {
        TokenAmount(&self.0 + &rhs.0)
    }
}

impl AddAssign<&TokenAmount> for TokenAmount {
    fn add_assign(&mut self, rhs: &TokenAmount) {
        self.0 += &rhs.0;
    }
}

impl Sub for TokenAmount {
    type Output = TokenAmount;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&TokenAmount> for &TokenAmount {
    type Output = TokenAmount;
    fn sub(self, rhs: &TokenAmount) -> Self::Output {
        TokenAmount(&self.0 - &rhs.0)
    }
}

impl SubAssign<&TokenAmount> for TokenAmount {
    fn sub_assign(&mut self, rhs: &TokenAmount) {
        self.0 -= &rhs.0;
    }
}

impl Mul<u64> for &TokenAmount {
    type Output = TokenAmount;
    fn mul(self, rhs: u64) -> Self::Output {
        TokenAmount(&self.0 * rhs)
    }
}

impl<'a> Sum<&'a TokenAmount> for TokenAmount {
    fn sum<I: Iterator<Item = &'a TokenAmount>>(iter: I) -> Self {
        iter.fold(TokenAmount::zero(), |acc, x| &acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn parses_decimal_prices() {
        assert_eq!(TokenAmount::parse("0.05").unwrap(), TokenAmount::from_nano(50_000_000));
        assert_eq!(TokenAmount::parse("0.15").unwrap(), TokenAmount::from_nano(150_000_000));
        assert_eq!(TokenAmount::parse("2").unwrap(), TokenAmount::from_whole(2));
        assert_eq!(TokenAmount::parse("0.000000001").unwrap(), TokenAmount::from_nano(1));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(matches!(TokenAmount::parse("abc"), Err(ParseError::NotANumber(_))));
        assert!(matches!(
            TokenAmount::parse("0.0000000001"),
            Err(ParseError::TooPrecise(_))
        ));
        assert!(matches!(TokenAmount::parse("-1"), Err(ParseError::Negative(_))));
    }

    #[test]
    fn displays_trimmed_fraction() {
        assert_eq!(TokenAmount::from_nano(200_000_000).to_string(), "0.2");
        assert_eq!(TokenAmount::from_whole(3).to_string(), "3");
        assert_eq!(TokenAmount::from_nano(1_000_000_001).to_string(), "1.000000001");
        assert_eq!(TokenAmount::from_nano(-5).to_string(), "-0.000000005");
    }

    #[test]
    fn prices_multiply_and_add() {
        let like = TokenAmount::parse("0.05").unwrap();
        let comment = TokenAmount::parse("0.15").unwrap();
        let payout = &(&comment * 2) + &(&like * 1);
        assert_eq!(payout, TokenAmount::parse("0.35").unwrap());
    }

    #[test]
    fn deserializes_text_and_integers() {
        #[derive(Deserialize)]
        struct Wrap {
            a: TokenAmount,
            b: TokenAmount,
        }
        let w: Wrap = toml::from_str("a = \"0.5\"\nb = 7").unwrap();
        assert_eq!(w.a, TokenAmount::from_nano(500_000_000));
        assert_eq!(w.b, TokenAmount::from_whole(7));
    }

    #[quickcheck]
    fn display_parses_back(nano: u64) {
        let amount = TokenAmount::from_nano(nano);
        assert_eq!(amount.to_string().parse::<TokenAmount>().unwrap(), amount);
    }
}
