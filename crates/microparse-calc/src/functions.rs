//! Built-in functions callable from expressions.

use microparse::{ParseError, raise};
use rand::{Rng, RngCore};
use strum::{Display, EnumString};

/// Upper bound of values produced by `rnd()`.
pub const RND_MAX: i64 = 2_147_483_647;

/// A built-in function, looked up by its lowercase name.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// use microparse_calc::Builtin;
///
/// assert_eq!(Builtin::from_str("max"), Ok(Builtin::Max));
/// assert!(Builtin::from_str("sqrt").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Builtin {
    /// Smallest of one or more arguments.
    Min,
    /// Largest of one or more arguments.
    Max,
    /// Random value in `0..=RND_MAX`; takes no arguments.
    Rnd,
}

impl Builtin {
    /// Applies the function to `args`.
    ///
    /// # Errors
    ///
    /// Raises a [`ParseError`] when the argument count does not suit the
    /// function.
    pub fn call<R>(self, args: &[i64], rng: &mut R) -> Result<i64, ParseError>
    where
        R: RngCore + ?Sized,
    {
        match self {
            Self::Min => args
                .iter()
                .copied()
                .min()
                .ok_or_else(|| ParseError::raised(format!("function {self}: needs at least one arg"))),
            Self::Max => args
                .iter()
                .copied()
                .max()
                .ok_or_else(|| ParseError::raised(format!("function {self}: needs at least one arg"))),
            Self::Rnd => {
                if !args.is_empty() {
                    raise!("no arguments for rnd() function");
                }
                Ok(rng.gen_range(0..=RND_MAX))
            }
        }
    }
}
