//! Typed command-line argument declaration and parsing.
//!
//! Callers declare named arguments with a value type, an optional short
//! alias, a description, a required flag, a default, and optionally a closed
//! set of permitted values. The parser then tokenizes an invocation,
//! converts each value to its declared type, checks that every argument
//! ended up set or defaulted, and hands back typed values.
//!
//! - [`Scalar`] — strict string/value conversion for the supported scalar
//!   types, with [`Value`] as the type-erased carrier.
//! - [`ChoiceValidator`] — closed-set membership on top of a caster.
//! - [`Argument`] — the contract shared by [`BasicArgument`] and
//!   [`ChoiceArgument`], declared through [`ArgDef`].
//! - [`Parser`] / [`ParsedArgs`] — registration, parsing, and typed
//!   retrieval, with usage text generation.
//!
//! Invocation tokens look like `--fullName=value` or `-shortName=value`.
//!
//! # Example
//!
//! ```
//! use typed_cmdline_core::*;
//!
//! let mut parser = Parser::new();
//! parser.add(ArgDef::<String>::required("--stringArg")).unwrap();
//! parser.add(ArgDef::<i32>::required("--intArg").with_short("-i").with_default(1)).unwrap();
//! parser
//!     .add(
//!         ArgDef::<f32>::optional("--floatArg")
//!             .with_short("-f")
//!             .with_default(0.1)
//!             .with_choices([0.1, 0.01, 0.001]),
//!     )
//!     .unwrap();
//! parser.add(ArgDef::<bool>::optional("--boolArg").with_default(true)).unwrap();
//!
//! let outcome = parser
//!     .try_parse_from(["prog", "--stringArg=a", "-i=5", "-f=0.01", "--boolArg=false"])
//!     .unwrap();
//! let ParseOutcome::Parsed(args) = outcome else {
//!     unreachable!("tokens were given");
//! };
//!
//! assert_eq!(args.get::<String>("--stringArg").unwrap(), "a");
//! assert_eq!(args.get::<i32>("-i").unwrap(), 5);
//! assert_eq!(args.get::<f32>("-f").unwrap(), 0.01);
//! assert!(!args.get::<bool>("--boolArg").unwrap());
//! ```

mod argument;
mod cast;
mod choice;
mod error;
mod parser;
mod registry;
mod validate;

pub use argument::{ArgDef, Argument, ArgumentInfo, BasicArgument, ChoiceArgument};
pub use cast::{Scalar, Value, ValueKind, cast_from_string, cast_to_string};
pub use choice::ChoiceValidator;
pub use error::{ArgError, Result};
pub use parser::{ParseOutcome, ParsedArgs, Parser};
pub use validate::validate_names;
