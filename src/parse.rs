use crate::error::{FractionError, Result};
use crate::fraction::Fraction;

/// Parses one of:
/// * a mixed number, `"3 1/2"` (the fractional part takes the sign of a negative whole part)
/// * a slash fraction, `"-1/4"`
/// * a decimal, `"0.75"`
/// * an integer, `"12"`
///
/// Parse errors always report the complete input.
pub fn parse_str(input: &str) -> Result<Fraction> {
    parse_tokens(input).map_err(|err| match err {
        FractionError::Parse { .. } => FractionError::parse(input),
        other => other,
    })
}

/// Numerator and denominator as separate strings.
pub fn parse_pair(numerator: &str, denominator: &str) -> Result<Fraction> {
    Fraction::new(leading_integer(numerator)?, leading_integer(denominator)?)
}

fn parse_tokens(input: &str) -> Result<Fraction> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next().ok_or_else(|| FractionError::parse(input))?;
    let second = tokens.next();
    if tokens.next().is_some() {
        return Err(FractionError::parse(input));
    }

    match second {
        Some(fractional) if fractional.contains('/') => parse_mixed(first, fractional),
        Some(_) => Err(FractionError::parse(input)),
        None if first.contains('/') => parse_slash(first),
        None if first.contains('.') => Fraction::from_f64(leading_real(first)?),
        None => Ok(Fraction::from_integer(leading_integer(first)?)),
    }
}

fn parse_mixed(whole: &str, fractional: &str) -> Result<Fraction> {
    let whole: i64 = whole.parse().map_err(|_| FractionError::parse(whole))?;
    let fractional = parse_tokens(fractional)?;
    let whole = Fraction::from_integer(whole);
    if whole.is_negative() {
        whole.subtract(fractional.abs()?)
    } else {
        whole.add(fractional)
    }
}

fn parse_slash(token: &str) -> Result<Fraction> {
    match token.split_once('/') {
        Some((numerator, denominator)) => parse_pair(numerator, denominator),
        None => Err(FractionError::parse(token)),
    }
}

/// Integer at the start of `text`: optional whitespace, optional sign, then digits. Anything after
/// the digits is ignored, so `"3.7"` reads as `3`.
pub fn leading_integer(text: &str) -> Result<i64> {
    let trimmed = text.trim_start();
    let sign = usize::from(trimmed.starts_with(|c: char| c == '+' || c == '-'));
    let digits = count_digits(&trimmed.as_bytes()[sign..]);
    if digits == 0 {
        return Err(FractionError::parse(text));
    }

    trimmed[..sign + digits]
        .parse()
        .map_err(|_| FractionError::Overflow)
}

/// Real number at the start of `text`, with an optional fractional part and exponent.
pub fn leading_real(text: &str) -> Result<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return Err(FractionError::parse(text));
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }

        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    trimmed[..end]
        .parse()
        .map_err(|_| FractionError::parse(text))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
pub mod tests {
    use crate::error::FractionError;
    use crate::fraction::Fraction;
    use crate::parse::{leading_integer, leading_real, parse_str};
    use proptest::prelude::*;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).expect("valid fraction")
    }

    fn parse_err(input: &str) -> FractionError {
        FractionError::Parse {
            input: input.to_string(),
        }
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse_str("3").unwrap(), f(3, 1));
        assert_eq!(parse_str("-12").unwrap(), f(-12, 1));
        assert_eq!(parse_str("  7 ").unwrap(), f(7, 1));
        assert_eq!(parse_str("+4").unwrap(), f(4, 1));
        assert_eq!(parse_str("12abc").unwrap(), f(12, 1));
    }

    #[test]
    fn test_slash() {
        assert_eq!(parse_str("1/4").unwrap(), f(1, 4));
        assert_eq!(parse_str("6/8").unwrap(), f(3, 4));
        assert_eq!(parse_str("-1/4").unwrap(), f(-1, 4));
        assert_eq!(parse_str("2/-4").unwrap(), f(-1, 2));
        assert_eq!(parse_str("0/9").unwrap(), Fraction::ZERO);
        assert_eq!(parse_str("1/0"), Err(FractionError::DivisionByZero));
        assert_eq!(parse_str("/2"), Err(parse_err("/2")));
        assert_eq!(parse_str("a/2"), Err(parse_err("a/2")));
        assert_eq!(parse_str("1/"), Err(parse_err("1/")));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_str("0.75").unwrap(), f(3, 4));
        assert_eq!(parse_str("-0.5").unwrap(), f(-1, 2));
        assert_eq!(parse_str(".5").unwrap(), f(1, 2));
        assert_eq!(parse_str("2.").unwrap(), f(2, 1));
        assert_eq!(parse_str("1.5e1").unwrap(), f(15, 1));
        assert_eq!(parse_str("0.333333333").unwrap(), f(333_333_333, 1_000_000_000));
        assert_eq!(parse_str("."), Err(parse_err(".")));
    }

    #[test]
    fn test_mixed() {
        assert_eq!(parse_str("3 1/2").unwrap(), f(7, 2));
        assert_eq!(parse_str("3 1/2").unwrap().to_string(), "3 1/2");
        assert_eq!(parse_str("-3 1/2").unwrap(), f(-7, 2));
        assert_eq!(parse_str("0 1/2").unwrap(), f(1, 2));
        assert_eq!(parse_str("1 3/2").unwrap(), f(5, 2));
        assert_eq!(parse_str(" 2   2/4 ").unwrap(), f(5, 2));
    }

    #[test]
    fn test_rejected() {
        for input in ["", "   ", "abc", "3 4", "1.5 1/2", "x 1/2", "1 1/2 3"].iter() {
            assert_eq!(parse_str(input), Err(parse_err(input)), "input {:?}", input);
        }
        assert_eq!(parse_str("1 x/2"), Err(parse_err("1 x/2")));
        assert_eq!(parse_str("1 1/0"), Err(FractionError::DivisionByZero));
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("3.7"), Ok(3));
        assert_eq!(leading_integer(" -42px"), Ok(-42));
        assert_eq!(leading_integer("-"), Err(parse_err("-")));
        assert_eq!(leading_integer("99999999999999999999"), Err(FractionError::Overflow));
    }

    #[test]
    fn test_leading_real() {
        assert_eq!(leading_real("1.25kg"), Ok(1.25));
        assert_eq!(leading_real("-2.5e-1"), Ok(-0.25));
        assert_eq!(leading_real("3e"), Ok(3.0));
        assert_eq!(leading_real("-.e5"), Err(parse_err("-.e5")));
    }

    proptest! {
        #[test]
        fn round_trips_through_display(n in -100_000i64..100_000, d in 1i64..10_000) {
            let value = f(n, d);
            prop_assert_eq!(parse_str(&value.to_string()).unwrap(), value);
            prop_assert_eq!(value.to_string().parse::<Fraction>().unwrap(), value);
        }
    }
}
