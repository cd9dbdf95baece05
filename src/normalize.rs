use crate::error::{FractionError, Result};
use crate::factor::gcf;
use crate::fraction::Fraction;
use tracing::trace;

/// Real values are rounded to this many decimal places before they are scaled up to integers.
pub const DECIMAL_PLACES: u32 = 9;

/// One side of a fraction before normalization. Real values only come from decimal input or from
/// multiplying/dividing by a real scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    pub fn is_zero(self) -> bool {
        match self {
            Scalar::Int(v) => v == 0,
            Scalar::Real(v) => v == 0.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Scalar::Int(_) => true,
            Scalar::Real(v) => v.is_finite(),
        }
    }

    pub fn checked_add(self, rhs: Scalar) -> Result<Scalar> {
        self.combine(rhs, i64::checked_add, |a, b| a + b)
    }

    pub fn checked_sub(self, rhs: Scalar) -> Result<Scalar> {
        self.combine(rhs, i64::checked_sub, |a, b| a - b)
    }

    pub fn checked_mul(self, rhs: Scalar) -> Result<Scalar> {
        self.combine(rhs, i64::checked_mul, |a, b| a * b)
    }

    fn combine(
        self,
        rhs: Scalar,
        exact: fn(i64, i64) -> Option<i64>,
        real: fn(f64, f64) -> f64,
    ) -> Result<Scalar> {
        match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => exact(a, b)
                .map(Scalar::Int)
                .ok_or(FractionError::Overflow),
            (a, b) => Ok(Scalar::Real(real(a.as_f64(), b.as_f64()))),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(v) => v as f64,
            Scalar::Real(v) => v,
        }
    }

    /// `Some` only for reals with a non-zero fractional part.
    fn fractional(self) -> Option<f64> {
        match self {
            Scalar::Real(v) if v.fract() != 0.0 => Some(v),
            _ => None,
        }
    }

    fn to_i64(self) -> Result<i64> {
        match self {
            Scalar::Int(v) => Ok(v),
            Scalar::Real(v) => {
                let v = v.round();
                // i64::MAX as f64 rounds up to 2^63
                if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                    Ok(v as i64)
                } else {
                    Err(FractionError::Overflow)
                }
            }
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Real(v)
    }
}

/// A numerator/denominator candidate that has not been reduced, sign-fixed or made integral yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFraction {
    pub numerator: Scalar,
    pub denominator: Scalar,
}

impl RawFraction {
    pub fn new<N, D>(numerator: N, denominator: D) -> Self
    where
        N: Into<Scalar>,
        D: Into<Scalar>,
    {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Multiplies both sides by `factor`, leaving the value unchanged.
    pub fn rescale(self, factor: Scalar) -> Result<Self> {
        Ok(Self {
            numerator: self.numerator.checked_mul(factor)?,
            denominator: self.denominator.checked_mul(factor)?,
        })
    }
}

impl From<Fraction> for RawFraction {
    fn from(f: Fraction) -> Self {
        RawFraction::new(f.numerator(), f.denominator())
    }
}

/// Canonicalizes a raw candidate:
/// * real sides are scaled by a power of ten until they are integral (denominator first)
/// * both sides are divided by their greatest common factor
/// * the sign moves to the numerator
/// * zero becomes `0/1`
pub fn normalize(raw: RawFraction) -> Result<Fraction> {
    let RawFraction {
        mut numerator,
        mut denominator,
    } = raw;

    if denominator.is_zero() {
        return Err(FractionError::DivisionByZero);
    }

    if !numerator.is_finite() || !denominator.is_finite() {
        return Err(FractionError::Overflow);
    }

    if let Some(value) = denominator.fractional() {
        let scale = decimal_scale(value);
        trace!(value, scale, "scaling real denominator");
        denominator = Scalar::Real((value * scale as f64).round());
        numerator = numerator.checked_mul(Scalar::Int(scale))?;
    }

    if let Some(value) = numerator.fractional() {
        let scale = decimal_scale(value);
        trace!(value, scale, "scaling real numerator");
        numerator = Scalar::Real((value * scale as f64).round());
        denominator = denominator.checked_mul(Scalar::Int(scale))?;
    }

    reduce(numerator.to_i64()?, denominator.to_i64()?)
}

/// Integer half of `normalize`.
pub fn reduce(numerator: i64, denominator: i64) -> Result<Fraction> {
    if denominator == 0 {
        return Err(FractionError::DivisionByZero);
    }

    if numerator == 0 {
        return Ok(Fraction::ZERO);
    }

    // i128 so that i64::MIN / -1 style sign flips cannot overflow mid-way
    let g = i128::from(gcf(numerator, denominator));
    let mut numerator = i128::from(numerator) / g;
    let mut denominator = i128::from(denominator) / g;
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }

    match (i64::try_from(numerator), i64::try_from(denominator)) {
        (Ok(numerator), Ok(denominator)) => Ok(Fraction::canonical(numerator, denominator)),
        _ => Err(FractionError::Overflow),
    }
}

fn round_to_places(value: f64, places: u32) -> f64 {
    let scalar = 10f64.powi(places as i32);
    (value * scalar).round() / scalar
}

/// `10^k` where `k` is the number of decimal digits `value` has after rounding.
fn decimal_scale(value: f64) -> i64 {
    let rounded = round_to_places(value, DECIMAL_PLACES);
    let digits = rounded
        .to_string()
        .split('.')
        .nth(1)
        .map_or(0, str::len)
        .min(DECIMAL_PLACES as usize);
    10i64.pow(digits as u32)
}
