use crate::fraction::Fraction;
use std::fmt;

/// More places than this would overflow the exact rounding in `Decimal`.
pub const MAX_DECIMAL_PLACES: u32 = 18;

/// Mixed-number rendering: `"3 1/2"`, `"-1/4"`, `"5"`, `"0"`.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, rest) = self.mixed_parts();
        let rendered = match (whole, rest.numerator()) {
            (whole, 0) => whole.to_string(),
            (0, remainder) => format!("{}/{}", remainder, rest.denominator()),
            (whole, remainder) => format!(
                "{} {}/{}",
                whole,
                remainder.unsigned_abs(),
                rest.denominator()
            ),
        };

        f.pad(&rendered)
    }
}

/// `"7/2"` instead of `"3 1/2"`.
#[derive(Clone, Copy, Debug)]
pub struct Improper(Fraction);

/// Rounds half away from zero to a fixed number of places.
#[derive(Clone, Copy, Debug)]
pub struct Decimal {
    fraction: Fraction,
    places: u32,
}

impl Fraction {
    pub fn improper(self) -> Improper {
        Improper(self)
    }

    /// `places` is capped at `MAX_DECIMAL_PLACES`.
    pub fn decimal(self, places: u32) -> Decimal {
        Decimal {
            fraction: self,
            places: places.min(MAX_DECIMAL_PLACES),
        }
    }
}

impl fmt::Display for Improper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Improper(fraction) = self;
        if fraction.is_whole() {
            f.pad(&fraction.numerator().to_string())
        } else {
            f.pad(&format!("{}/{}", fraction.numerator(), fraction.denominator()))
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = 10u128.pow(self.places);
        let numerator = u128::from(self.fraction.numerator().unsigned_abs());
        let denominator = u128::from(self.fraction.denominator().unsigned_abs());
        let scaled = (numerator * unit * 2 + denominator) / (denominator * 2);

        let sign = if self.fraction.is_negative() && scaled != 0 {
            "-"
        } else {
            ""
        };

        let rendered = if self.places == 0 {
            format!("{}{}", sign, scaled)
        } else {
            format!(
                "{}{}.{:0width$}",
                sign,
                scaled / unit,
                scaled % unit,
                width = self.places as usize
            )
        };

        f.pad(&rendered)
    }
}

#[cfg(test)]
pub mod tests {
    use crate::fraction::Fraction;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).expect("valid fraction")
    }

    #[test]
    fn test_mixed() {
        assert_eq!(f(7, 2).to_string(), "3 1/2");
        assert_eq!(f(-7, 2).to_string(), "-3 1/2");
        assert_eq!(f(1, 2).to_string(), "1/2");
        assert_eq!(f(-1, 2).to_string(), "-1/2");
        assert_eq!(f(8, 2).to_string(), "4");
        assert_eq!(f(-4, 1).to_string(), "-4");
    }

    #[test]
    fn test_zero() {
        assert_eq!(f(0, 5).to_string(), "0");
        assert_eq!(Fraction::ZERO.to_string(), "0");
    }

    #[test]
    fn test_padding() {
        assert_eq!(format!("{:>6}", f(1, 2)), "   1/2");
        assert_eq!(format!("{:<6}|", f(7, 2).improper()), "7/2   |");
    }

    #[test]
    fn test_improper() {
        assert_eq!(f(7, 2).improper().to_string(), "7/2");
        assert_eq!(f(-7, 2).improper().to_string(), "-7/2");
        assert_eq!(f(6, 2).improper().to_string(), "3");
    }

    #[test]
    fn test_decimal() {
        assert_eq!(f(1, 3).decimal(4).to_string(), "0.3333");
        assert_eq!(f(2, 3).decimal(2).to_string(), "0.67");
        assert_eq!(f(-1, 8).decimal(2).to_string(), "-0.13");
        assert_eq!(f(-1, 1000).decimal(2).to_string(), "0.00");
        assert_eq!(f(7, 2).decimal(0).to_string(), "4");
        assert_eq!(f(5, 1).decimal(3).to_string(), "5.000");
        assert_eq!(f(1, 40).decimal(3).to_string(), "0.025");
        assert_eq!(
            Fraction::from_integer(i64::MIN).decimal(99).to_string(),
            "-9223372036854775808.000000000000000000"
        );
    }
}
