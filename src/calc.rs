use crate::fraction::Fraction;
use crate::util::try_use_iter;
use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        use Op::*;
        Ok(match s {
            "+" => Add,
            "-" => Subtract,
            "*" | "x" | "×" => Multiply,
            "/" | "÷" => Divide,
            "=" | "==" => Equals,
            other => return Err(anyhow!("unknown operator {:?}", other)),
        })
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Op::*;
        f.write_str(match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Equals => "=",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Number(Fraction),
    Truth(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => fmt::Display::fmt(v, f),
            Value::Truth(v) => fmt::Display::fmt(v, f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub left: Fraction,
    pub op: Op,
    pub right: Fraction,
    pub result: Value,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} => {}", self.left, self.op, self.right, self.result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub value: Value,
    pub steps: Vec<Step>,
}

/// Evaluates `operand (op operand)*` strictly left to right, no precedence. Operands are anything
/// `Fraction::parse` accepts, so a mixed number has to arrive as a single token (`"1 1/2"`).
pub fn evaluate<S: AsRef<str>>(tokens: &[S]) -> Result<Evaluation> {
    let (first, rest) = tokens
        .split_first()
        .ok_or_else(|| anyhow!("nothing to evaluate"))?;
    let first = parse_operand(first.as_ref(), 0)?;

    if rest.len() % 2 != 0 {
        let dangling = rest[rest.len() - 1].as_ref();
        return Err(anyhow!("operator {:?} is missing its right-hand side", dangling));
    }

    let pairs = rest.chunks(2).enumerate().map(|(idx, pair)| {
        let op: Op = pair[0].as_ref().parse()?;
        let right = parse_operand(pair[1].as_ref(), 2 * idx + 2)?;
        Ok::<_, anyhow::Error>((op, right))
    });

    let (value, steps) = try_use_iter(pairs, |pairs| {
        pairs.try_fold(
            (Value::Number(first), Vec::new()),
            |(value, mut steps), (op, right)| {
                let step = apply(value, op, right)?;
                steps.push(step);
                Ok::<_, anyhow::Error>((step.result, steps))
            },
        )
    })??;

    Ok(Evaluation { value, steps })
}

fn parse_operand(token: &str, position: usize) -> Result<Fraction> {
    Fraction::parse(token).with_context(|| format!("bad operand at position {}", position + 1))
}

fn apply(value: Value, op: Op, right: Fraction) -> Result<Step> {
    let left = match value {
        Value::Number(left) => left,
        Value::Truth(_) => return Err(anyhow!("cannot apply {} to the result of a comparison", op)),
    };

    let result = match op {
        Op::Add => Value::Number(left.add(right)?),
        Op::Subtract => Value::Number(left.subtract(right)?),
        Op::Multiply => Value::Number(left.multiply(right)?),
        Op::Divide => Value::Number(left.divide(right)?),
        Op::Equals => Value::Truth(left.equals(right)?),
    };

    debug!(%left, %op, %right, %result, "applied step");
    Ok(Step {
        left,
        op,
        right,
        result,
    })
}

#[cfg(test)]
pub mod tests {
    use crate::calc::{evaluate, Op, Value};
    use crate::error::FractionError;
    use crate::fraction::Fraction;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).expect("valid fraction")
    }

    #[test]
    fn test_single_operand() {
        let out = evaluate(&["3 1/2"]).unwrap();
        assert_eq!(out.value, Value::Number(f(7, 2)));
        assert!(out.steps.is_empty());
    }

    #[test]
    fn test_left_to_right() {
        let out = evaluate(&["3 1/2", "*", "2", "-", "1/2"]).unwrap();
        assert_eq!(out.value, Value::Number(f(13, 2)));
        assert_eq!(out.value.to_string(), "6 1/2");
        assert_eq!(out.steps.len(), 2);
        assert_eq!(out.steps[0].to_string(), "3 1/2 * 2 => 7");
        assert_eq!(out.steps[1].op, Op::Subtract);
    }

    #[test]
    fn test_negative_operands() {
        let out = evaluate(&["-1/2", "-", "-1/4", "x", "0.5"]).unwrap();
        assert_eq!(out.value, Value::Number(f(-1, 8)));
    }

    #[test]
    fn test_equals() {
        let tokens = vec!["2/4".to_string(), "=".to_string(), "0.5".to_string()];
        assert_eq!(evaluate(&tokens).unwrap().value, Value::Truth(true));
        assert_eq!(evaluate(&["1/3", "==", "1/2"]).unwrap().value, Value::Truth(false));
    }

    #[test]
    fn test_errors() {
        let empty: [&str; 0] = [];
        assert!(evaluate(&empty).is_err());
        assert!(evaluate(&["1", "+"]).is_err());
        assert!(evaluate(&["1", "%", "2"]).is_err());
        assert!(evaluate(&["1", "=", "1", "+", "1"]).is_err());

        let err = evaluate(&["1", "+", "abc"]).unwrap_err();
        assert_eq!(err.to_string(), "bad operand at position 3");
        assert_eq!(
            err.downcast_ref::<FractionError>(),
            Some(&FractionError::Parse {
                input: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_division_by_zero() {
        let err = evaluate(&["1", "/", "0"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FractionError>(),
            Some(&FractionError::DivisionByZero)
        );
    }

    #[test]
    fn test_op_round_trip() {
        for op in [Op::Add, Op::Subtract, Op::Multiply, Op::Divide, Op::Equals].iter() {
            assert_eq!(op.to_string().parse::<Op>().unwrap(), *op);
        }
    }
}
