use crate::error::{FractionError, Result};
use crate::factor;
use crate::normalize::{normalize, reduce, RawFraction, Scalar};
use crate::parse;
use num_rational::Rational64;
use std::cmp::Ordering;
use std::ops::Neg;
use std::str::FromStr;

/// Wires the std operator traits to the fallible methods. The operators panic where the methods
/// return an error, the same way integer overflow does.
macro_rules! impl_ops_checked {
    ($t: ident, $($op: ident, $op_fn: ident, $assign: ident, $assign_fn: ident => $checked: ident;)*) => {
        $(
            impl<'a, T> std::ops::$op<T> for $t
            where
                T: Into<Operand<'a>>,
            {
                type Output = Self;

                fn $op_fn(self, rhs: T) -> Self::Output {
                    match $t::$checked(self, rhs) {
                        Ok(out) => out,
                        Err(err) => panic!("{} failed: {}", stringify!($checked), err),
                    }
                }
            }

            impl<'a, T> std::ops::$assign<T> for $t
            where
                T: Into<Operand<'a>>,
            {
                fn $assign_fn(&mut self, rhs: T) {
                    *self = std::ops::$op::$op_fn(*self, rhs)
                }
            }
        )*
    };
}

/// An exact fraction in lowest terms. The denominator is always positive, zero is `0/1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

/// Right-hand side of an arithmetic operation. Text is promoted through the parser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand<'a> {
    Fraction(Fraction),
    Integer(i64),
    Real(f64),
    Text(&'a str),
}

impl Fraction {
    pub const ZERO: Fraction = Fraction::canonical(0, 1);
    pub const ONE: Fraction = Fraction::canonical(1, 1);

    /// Only for pairs already in canonical form.
    pub(crate) const fn canonical(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        reduce(numerator, denominator)
    }

    pub fn from_integer(value: i64) -> Self {
        Self::canonical(value, 1)
    }

    /// Exact value of the decimal rendering of `value`, rounded to 9 places.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(FractionError::parse(value.to_string()));
        }

        normalize(RawFraction::new(value, 1i64))
    }

    /// Numerator and denominator given as text, each read up to the end of its leading integer.
    pub fn from_strs(numerator: &str, denominator: &str) -> Result<Self> {
        parse::parse_pair(numerator, denominator)
    }

    /// Accepts `"3"`, `"-1/4"`, `"0.75"` and mixed numbers like `"3 1/2"`.
    pub fn parse(input: &str) -> Result<Self> {
        parse::parse_str(input)
    }

    /// See `factor::gcf`.
    pub fn gcf(a: i64, b: i64) -> u64 {
        factor::gcf(a, b)
    }

    pub fn prime_factors(n: i64) -> Vec<u64> {
        factor::prime_factors(n)
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_whole(&self) -> bool {
        self.denominator == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn abs(self) -> Result<Self> {
        self.numerator
            .checked_abs()
            .map(|numerator| Self::canonical(numerator, self.denominator))
            .ok_or(FractionError::Overflow)
    }

    pub fn reciprocal(self) -> Result<Self> {
        reduce(self.denominator, self.numerator)
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole part (truncated toward zero) and the signed remainder as a proper fraction.
    pub fn mixed_parts(&self) -> (i64, Fraction) {
        let whole = self.numerator / self.denominator;
        let remainder = self.numerator % self.denominator;
        if remainder == 0 {
            (whole, Fraction::ZERO)
        } else {
            (whole, Self::canonical(remainder, self.denominator))
        }
    }

    pub fn add<'a, T: Into<Operand<'a>>>(self, other: T) -> Result<Self> {
        let other: Operand = other.into();
        self.cross_combine(other.into_fraction()?, Scalar::checked_add)
    }

    pub fn subtract<'a, T: Into<Operand<'a>>>(self, other: T) -> Result<Self> {
        let other: Operand = other.into();
        self.cross_combine(other.into_fraction()?, Scalar::checked_sub)
    }

    pub fn multiply<'a, T: Into<Operand<'a>>>(self, other: T) -> Result<Self> {
        let mut raw = RawFraction::from(self);
        let other: Operand = other.into();
        match other {
            Operand::Fraction(other) => {
                raw.numerator = raw.numerator.checked_mul(other.numerator.into())?;
                raw.denominator = raw.denominator.checked_mul(other.denominator.into())?;
            }
            Operand::Text(text) => return self.multiply(Fraction::parse(text)?),
            scalar => raw.numerator = raw.numerator.checked_mul(scalar.into_scalar()?)?,
        }

        normalize(raw)
    }

    pub fn divide<'a, T: Into<Operand<'a>>>(self, other: T) -> Result<Self> {
        let mut raw = RawFraction::from(self);
        let other: Operand = other.into();
        match other {
            Operand::Fraction(other) => {
                raw.numerator = raw.numerator.checked_mul(other.denominator.into())?;
                raw.denominator = raw.denominator.checked_mul(other.numerator.into())?;
            }
            Operand::Text(text) => return self.divide(Fraction::parse(text)?),
            scalar => raw.denominator = raw.denominator.checked_mul(scalar.into_scalar()?)?,
        }

        normalize(raw)
    }

    /// Numeric equality against anything that can be promoted to a fraction.
    pub fn equals<'a, T: Into<Operand<'a>>>(self, other: T) -> Result<bool> {
        let other: Operand = other.into();
        let a = normalize(RawFraction::from(self))?;
        let b = normalize(RawFraction::from(other.into_fraction()?))?;
        Ok(a.numerator == b.numerator && a.denominator == b.denominator)
    }

    /// Brings both sides onto the product of the two denominators, then combines numerators.
    fn cross_combine(
        self,
        other: Self,
        combine: fn(Scalar, Scalar) -> Result<Scalar>,
    ) -> Result<Self> {
        let left = RawFraction::from(self).rescale(other.denominator.into())?;
        let right = RawFraction::from(other).rescale(self.denominator.into())?;
        normalize(RawFraction {
            numerator: combine(left.numerator, right.numerator)?,
            denominator: left.denominator,
        })
    }
}

impl<'a> Operand<'a> {
    pub fn into_fraction(self) -> Result<Fraction> {
        match self {
            Operand::Fraction(f) => Ok(f),
            Operand::Integer(v) => Ok(Fraction::from_integer(v)),
            Operand::Real(v) => Fraction::from_f64(v),
            Operand::Text(text) => Fraction::parse(text),
        }
    }

    fn into_scalar(self) -> Result<Scalar> {
        match self {
            Operand::Integer(v) => Ok(Scalar::Int(v)),
            Operand::Real(v) if v.is_finite() => Ok(Scalar::Real(v)),
            Operand::Real(v) => Err(FractionError::parse(v.to_string())),
            other => Err(FractionError::parse(format!("{:?}", other))),
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.numerator.checked_neg() {
            Some(numerator) => Self::canonical(numerator, self.denominator),
            None => panic!("negation overflowed: {:?}", self),
        }
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = i128::from(self.numerator) * i128::from(other.denominator);
        let rhs = i128::from(other.numerator) * i128::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self> {
        Fraction::parse(s)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> Self {
        f.to_f64()
    }
}

impl From<Fraction> for Rational64 {
    fn from(f: Fraction) -> Self {
        Rational64::new_raw(f.numerator, f.denominator)
    }
}

impl TryFrom<Rational64> for Fraction {
    type Error = FractionError;

    fn try_from(r: Rational64) -> Result<Self> {
        Fraction::new(*r.numer(), *r.denom())
    }
}

macro_rules! impl_from_int {
    ($($int: ty),*) => {
        $(
            impl From<$int> for Fraction {
                fn from(v: $int) -> Self {
                    Fraction::from_integer(i64::from(v))
                }
            }

            impl<'a> From<$int> for Operand<'a> {
                fn from(v: $int) -> Self {
                    Operand::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i64, i32, u32, i16, u16, i8, u8);

impl<'a> From<Fraction> for Operand<'a> {
    fn from(f: Fraction) -> Self {
        Operand::Fraction(f)
    }
}

impl<'a> From<&'a Fraction> for Operand<'a> {
    fn from(f: &'a Fraction) -> Self {
        Operand::Fraction(*f)
    }
}

impl<'a> From<f64> for Operand<'a> {
    fn from(v: f64) -> Self {
        Operand::Real(v)
    }
}

impl<'a> From<f32> for Operand<'a> {
    fn from(v: f32) -> Self {
        Operand::Real(f64::from(v))
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Operand::Text(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Operand::Text(text.as_str())
    }
}

impl_ops_checked!(Fraction,
    Add, add, AddAssign, add_assign => add;
    Sub, sub, SubAssign, sub_assign => subtract;
    Mul, mul, MulAssign, mul_assign => multiply;
    Div, div, DivAssign, div_assign => divide;
);
