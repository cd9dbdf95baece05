//! Exact fractions over `i64`.
//!
//! ```
//! use fractional::Fraction;
//!
//! let half = Fraction::new(1, 2)?;
//! assert_eq!(half.add(Fraction::new(1, 3)?)?, Fraction::new(5, 6)?);
//! assert_eq!(Fraction::parse("1/4")?.multiply(2)?.to_string(), "1/2");
//! assert_eq!("3 1/2".parse::<Fraction>()?.to_string(), "3 1/2");
//! # Ok::<(), fractional::FractionError>(())
//! ```

pub mod calc;
pub mod config;
pub mod error;
pub mod factor;
pub mod format;
pub mod fraction;
pub mod normalize;
mod parse;
mod serialize;
pub mod util;

pub use error::{FractionError, Result};
pub use factor::{gcf, prime_factors};
pub use format::{Decimal, Improper};
pub use fraction::{Fraction, Operand};
pub use parse::{leading_integer, leading_real};
