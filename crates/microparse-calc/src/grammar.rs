//! Recursive-descent evaluator for integer expressions.
//!
//! ```text
//! line:    "q" | "quit" | { expr }
//! expr:    term ( <end of line> | "," )
//! term:    factor { ("+" | "-") factor }
//! factor:  primary { ("*" | "/") primary }
//! primary: identifier "(" [ term { [","] term } ] ")"
//!        | identifier
//!        | "(" term ")"
//!        | "-" primary | "+" primary
//!        | <hex> | <integer>
//! ```
//!
//! Every rule evaluates as it parses. Failures are raised as
//! [`ParseError`]s and unwind to the recovery point around the line.

use std::borrow::Cow;
use std::str::FromStr;

use microparse::{ParseError, Parser, Scanned, Terminal, TerminalHandle, raise};
use rand::RngCore;
use tracing::trace;

use crate::functions::Builtin;
use crate::variables::Variables;

/// Names longer than this are clipped before lookup.
pub const NAME_LIMIT: usize = 19;

const fn literal(text: &'static str) -> Terminal {
    Terminal::Literal(Cow::Borrowed(text))
}

const OPEN: Terminal = literal("(");
const CLOSE: Terminal = literal(")");
const COMMA: Terminal = literal(",");
const PLUS: Terminal = literal("+");
const MINUS: Terminal = literal("-");
const QUIT: [Terminal; 2] = [literal("q"), literal("quit")];
const ADDITIVE: [Terminal; 2] = [PLUS, MINUS];
const MULTIPLICATIVE: [Terminal; 2] = [literal("*"), literal("/")];

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, lhs: i64, rhs: i64) -> Result<i64, ParseError> {
        let result = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => {
                if rhs == 0 {
                    raise!("division by zero");
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or_else(overflow)
    }
}

fn overflow() -> ParseError {
    ParseError::raised("arithmetic overflow")
}

/// Scans a `0x`-prefixed hexadecimal constant.
///
/// # Errors
///
/// Raises a [`ParseError`] when the constant does not fit in an `i64`.
pub fn scan_hex(rest: &str, _slot: usize) -> Result<Scanned, ParseError> {
    let Some(digits) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) else {
        return Ok(Scanned::none());
    };
    let len = digits.bytes().take_while(u8::is_ascii_hexdigit).count();
    let Some(hex) = digits.get(..len).filter(|text| !text.is_empty()) else {
        return Ok(Scanned::none());
    };
    let Ok(value) = i64::from_str_radix(hex, 16) else {
        raise!("hex constant 0x{hex} out of range");
    };
    Ok(Scanned::new(len.saturating_add(2)).with_value(value))
}

/// Evaluates lines of the expression grammar.
pub struct Evaluator<'v> {
    hex: TerminalHandle,
    variables: &'v dyn Variables,
    rng: Box<dyn RngCore>,
    max_args: usize,
}

impl<'v> Evaluator<'v> {
    /// Creates an evaluator.
    ///
    /// `hex` must be the handle returned when [`scan_hex`] was registered
    /// with the registry the evaluator's parsers use.
    #[must_use]
    pub const fn new(
        hex: TerminalHandle,
        variables: &'v dyn Variables,
        rng: Box<dyn RngCore>,
        max_args: usize,
    ) -> Self {
        Self {
            hex,
            variables,
            rng,
            max_args,
        }
    }

    /// Evaluates one line, appending each expression's value to `values`.
    ///
    /// Returns `true` when the line asks to quit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] raised on the line; values
    /// evaluated before it remain in `values`.
    pub fn line(
        &mut self,
        parser: &mut Parser<'_, '_>,
        values: &mut Vec<i64>,
    ) -> Result<bool, ParseError> {
        if parser.accept(&QUIT)? {
            return Ok(true);
        }
        while !parser.accept(&[Terminal::EndOfInput])? {
            let value = self.expr(parser)?;
            trace!(value, "expression evaluated");
            values.push(value);
        }
        Ok(false)
    }

    fn expr(&mut self, parser: &mut Parser<'_, '_>) -> Result<i64, ParseError> {
        let value = self.term(parser)?;
        parser.expect(&[Terminal::EndOfInput, COMMA])?;
        Ok(value)
    }

    fn term(&mut self, parser: &mut Parser<'_, '_>) -> Result<i64, ParseError> {
        let mut value = self.factor(parser)?;
        while let Some(op) = operator(parser, &ADDITIVE, [Op::Add, Op::Sub])? {
            let rhs = self.factor(parser)?;
            value = op.apply(value, rhs)?;
        }
        Ok(value)
    }

    fn factor(&mut self, parser: &mut Parser<'_, '_>) -> Result<i64, ParseError> {
        let mut value = self.primary(parser)?;
        while let Some(op) = operator(parser, &MULTIPLICATIVE, [Op::Mul, Op::Div])? {
            let rhs = self.primary(parser)?;
            value = op.apply(value, rhs)?;
        }
        Ok(value)
    }

    fn primary(&mut self, parser: &mut Parser<'_, '_>) -> Result<i64, ParseError> {
        if parser.accept_all(&[Terminal::Identifier, OPEN])? {
            let name = captured_name(parser);
            return self.call(parser, name);
        }
        if parser.accept(&[Terminal::Identifier])? {
            return self.variable(captured_name(parser));
        }
        if parser.accept(&[OPEN])? {
            let value = self.term(parser)?;
            parser.expect(&[CLOSE])?;
            return Ok(value);
        }
        if parser.accept(&[MINUS])? {
            return self.primary(parser)?.checked_neg().ok_or_else(overflow);
        }
        if parser.accept(&[PLUS])? {
            return self.primary(parser);
        }
        if parser.accept(&[self.hex.into(), Terminal::Integer])? {
            let constant = parser
                .user_value::<i64>(0)
                .copied()
                .or_else(|| parser.integer(1));
            return constant.ok_or_else(|| ParseError::raised("constant was not captured"));
        }
        match parser.rest().chars().next() {
            Some(found) => raise!("syntax error at {found}"),
            None => raise!("syntax error at end of line"),
        }
    }

    fn call(&mut self, parser: &mut Parser<'_, '_>, name: &str) -> Result<i64, ParseError> {
        let Ok(builtin) = Builtin::from_str(name) else {
            raise!("undefined function {name}");
        };
        let mut args = Vec::new();
        while !parser.accept(&[CLOSE])? {
            if args.len() >= self.max_args {
                raise!("function {name}: too many args");
            }
            args.push(self.term(parser)?);
            if !parser.accept(&[COMMA])? && parser.accept(&[Terminal::EndOfInput])? {
                raise!("unclosed paren on function call {name}");
            }
        }
        trace!(function = %builtin, args = args.len(), "calling builtin");
        builtin.call(&args, self.rng.as_mut())
    }

    fn variable(&self, name: &str) -> Result<i64, ParseError> {
        let value = self
            .variables
            .lookup(name)
            .and_then(|text| text.trim().parse::<i64>().ok());
        let Some(number) = value else {
            raise!("{name} not found in environment");
        };
        Ok(number)
    }
}

/// Accepts one of two operator literals and maps it to its operation.
fn operator(
    parser: &mut Parser<'_, '_>,
    terminals: &[Terminal; 2],
    ops: [Op; 2],
) -> Result<Option<Op>, ParseError> {
    if !parser.accept(terminals)? {
        return Ok(None);
    }
    Ok(parser.matched().and_then(|index| ops.get(index).copied()))
}

/// Returns the identifier in capture slot 0, clipped to [`NAME_LIMIT`].
fn captured_name<'l>(parser: &Parser<'_, 'l>) -> &'l str {
    parser
        .capture(0)
        .map(|slot| slot.truncated(NAME_LIMIT))
        .unwrap_or_default()
}
