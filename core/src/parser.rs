//! Registration, parsing, and typed retrieval.
//!
//! Parsing is split into two types so the phase order is checked by the
//! compiler:
//!
//! - [`Parser`] accepts registrations and renders usage text.
//! - [`Parser::try_parse_from`] consumes the parser; on success it yields
//!   [`ParsedArgs`], which only supports reads and can be shared across
//!   threads.
//!
//! # Invocation grammar
//!
//! Each token after the program name is `--fullName=value` or
//! `-shortName=value`. The token is split on its first `=`, so values may
//! themselves contain `=`. There is no `name value` form and no bare
//! boolean flag.

use std::io::{self, Write};

use tracing::debug;

use crate::argument::{ArgDef, Argument, ArgumentInfo};
use crate::cast::{Scalar, Value};
use crate::error::{ArgError, Result};
use crate::registry::Registry;

const SEPARATOR: char = '=';

/// Result of a parse that did not fail.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Tokens were parsed and validated.
    Parsed(ParsedArgs),
    /// The invocation had no tokens after the program name; carries the
    /// usage text to show instead.
    Usage(String),
}

/// Argument registry in its registration phase.
///
/// # Examples
///
/// ```
/// use typed_cmdline_core::{ArgDef, ParseOutcome, Parser};
///
/// let mut parser = Parser::new();
/// parser.add(ArgDef::<String>::required("--stringArg")).unwrap();
/// parser.add(ArgDef::<i32>::required("--intArg").with_short("-i").with_default(1)).unwrap();
///
/// let ParseOutcome::Parsed(args) = parser
///     .try_parse_from(["prog", "--stringArg=a", "-i=5"])
///     .unwrap()
/// else {
///     panic!("expected parsed arguments");
/// };
/// assert_eq!(args.get::<String>("--stringArg").unwrap(), "a");
/// assert_eq!(args.get::<i32>("-i").unwrap(), 5);
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    program_name: Option<String>,
    registry: Registry,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `name` in usage text instead of the program name taken from the
    /// first invocation item.
    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    /// Registers an argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateDefinition`] if the full name or the
    /// short name is already registered, or a name-format error from
    /// [`validate_names`](crate::validate_names).
    pub fn add<T: Scalar>(&mut self, def: ArgDef<T>) -> Result<()> {
        let argument = def.into_argument()?;
        debug!(
            argument = %argument.full_name(),
            short = ?argument.short_name(),
            kind = %argument.kind(),
            required = argument.required(),
            "Registered argument"
        );
        self.registry.insert(argument)
    }

    /// Registered arguments in registration order.
    pub fn arguments(&self) -> impl Iterator<Item = &dyn Argument> {
        self.registry.iter()
    }

    /// Serializable descriptions of the registered arguments.
    pub fn describe(&self) -> Vec<ArgumentInfo> {
        self.registry.iter().map(|a| a.info()).collect()
    }

    /// Full usage text.
    pub fn usage(&self) -> String {
        self.registry
            .usage(self.program_name.as_deref().unwrap_or_default())
    }

    /// Parses an invocation in the shape of [`std::env::args`]: the first
    /// item is the program name, the rest are tokens.
    ///
    /// Tokens are processed left to right and the first error stops the
    /// pass. After all tokens, every argument must be set or have a default.
    ///
    /// # Errors
    ///
    /// - [`ArgError::MalformedToken`] for a token without `=` or without a
    ///   `-`/`--` prefix.
    /// - [`ArgError::UnknownArgument`] for an unregistered name.
    /// - [`ArgError::DuplicateAssignment`] when a name is given twice.
    /// - [`ArgError::TypeCast`] / [`ArgError::ChoiceViolation`] from reading
    ///   the value.
    /// - [`ArgError::MissingRequiredArgument`] / [`ArgError::MissingDefault`]
    ///   from the completeness check.
    pub fn try_parse_from<I, S>(mut self, args: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = args.into_iter().map(Into::into);
        let argv0 = iter.next().unwrap_or_default();
        if self.program_name.is_none() {
            self.program_name = Some(argv0);
        }

        let tokens = iter.collect::<Vec<String>>();
        if tokens.is_empty() {
            debug!("No arguments given, returning usage");
            return Ok(ParseOutcome::Usage(self.usage()));
        }

        for token in &tokens {
            self.read_token(token)?;
        }

        for argument in self.registry.iter() {
            argument.is_ready()?;
        }
        debug!(
            tokens = tokens.len(),
            arguments = self.registry.len(),
            "Parsed arguments"
        );

        Ok(ParseOutcome::Parsed(ParsedArgs {
            program_name: self.program_name.unwrap_or_default(),
            registry: self.registry,
        }))
    }

    /// Like [`try_parse_from`](Self::try_parse_from), but a bare invocation
    /// prints the usage text to stdout and exits the process with status 1.
    ///
    /// # Errors
    ///
    /// Same as [`try_parse_from`](Self::try_parse_from).
    pub fn parse_from<I, S>(self, args: I) -> Result<ParsedArgs>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse_from(args)? {
            ParseOutcome::Parsed(parsed) => Ok(parsed),
            ParseOutcome::Usage(usage) => {
                let mut stdout = io::stdout();
                if let Err(e) = writeln!(stdout, "{usage}").and_then(|_| stdout.flush()) {
                    eprintln!("could not write to stdout\n{e}");
                }
                std::process::exit(1);
            }
        }
    }

    /// Parses the current process arguments, see [`parse_from`](Self::parse_from).
    ///
    /// # Errors
    ///
    /// Same as [`try_parse_from`](Self::try_parse_from).
    pub fn parse(self) -> Result<ParsedArgs> {
        self.parse_from(std::env::args())
    }

    fn read_token(&mut self, token: &str) -> Result<()> {
        let (name, value) = split_token(token)?;
        let argument = self.registry.get_mut(name)?;
        if argument.is_set() {
            return Err(ArgError::DuplicateAssignment(
                argument.full_name().to_string(),
            ));
        }
        debug!(token, argument = %argument.full_name(), "Resolved token");
        argument.read(value)
    }
}

/// Splits `--name=value` / `-name=value` on the first `=`.
fn split_token(token: &str) -> Result<(&str, &str)> {
    let malformed = || ArgError::MalformedToken(token.to_string());
    let (name, value) = token.split_once(SEPARATOR).ok_or_else(malformed)?;
    if !name.starts_with('-') {
        return Err(malformed());
    }
    Ok((name, value))
}

/// Arguments after a successful parse.
///
/// Read-only; safe to share between threads.
#[derive(Debug)]
pub struct ParsedArgs {
    program_name: String,
    registry: Registry,
}

impl ParsedArgs {
    /// Returns the value of the argument `name` (`--full` or `-short`).
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::UnknownArgument`] for an unregistered name and
    /// [`ArgError::TypeMismatch`] when `T` is not the registered type.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_cmdline_core::{ArgDef, ArgError, ParseOutcome, Parser, ValueKind};
    ///
    /// let mut parser = Parser::new();
    /// parser.add(ArgDef::<bool>::optional("--boolArg").with_default(true)).unwrap();
    /// let ParseOutcome::Parsed(args) = parser.try_parse_from(["prog", "--boolArg=false"]).unwrap()
    /// else {
    ///     unreachable!()
    /// };
    ///
    /// assert_eq!(args.get::<bool>("--boolArg"), Ok(false));
    /// assert_eq!(
    ///     args.get::<i32>("--boolArg"),
    ///     Err(ArgError::TypeMismatch {
    ///         name: "--boolArg".into(),
    ///         requested: ValueKind::I32,
    ///         actual: ValueKind::Bool,
    ///     }),
    /// );
    /// ```
    pub fn get<T: Scalar>(&self, name: &str) -> Result<T> {
        let argument = self.registry.get(name)?;
        T::from_value(&argument.value()).ok_or_else(|| ArgError::TypeMismatch {
            name: argument.full_name().to_string(),
            requested: T::KIND,
            actual: argument.kind(),
        })
    }

    /// Whether `name` was given explicitly rather than defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::UnknownArgument`] for an unregistered name.
    pub fn is_set(&self, name: &str) -> Result<bool> {
        Ok(self.registry.get(name)?.is_set())
    }

    /// Every argument's full name and value, in registration order.
    pub fn values(&self) -> Vec<(String, Value)> {
        self.registry
            .iter()
            .map(|a| (a.full_name().to_string(), a.value()))
            .collect()
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Full usage text.
    pub fn usage(&self) -> String {
        self.registry.usage(&self.program_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Parser {
        let mut parser = Parser::new();
        parser
            .add(ArgDef::<String>::required("--stringArg").with_description("a string"))
            .unwrap();
        parser
            .add(
                ArgDef::<i32>::required("--intArg")
                    .with_short("-i")
                    .with_default(1),
            )
            .unwrap();
        parser
    }

    fn parsed(parser: Parser, args: &[&str]) -> Result<ParsedArgs> {
        match parser.try_parse_from(args.iter().copied())? {
            ParseOutcome::Parsed(parsed) => Ok(parsed),
            ParseOutcome::Usage(usage) => panic!("unexpected usage:\n{usage}"),
        }
    }

    #[test]
    fn test_split_token_on_first_separator() {
        assert_eq!(split_token("--a=b=c"), Ok(("--a", "b=c")));
        assert_eq!(split_token("-i="), Ok(("-i", "")));
        assert_eq!(
            split_token("foo"),
            Err(ArgError::MalformedToken("foo".to_string()))
        );
        assert_eq!(
            split_token("foo=1"),
            Err(ArgError::MalformedToken("foo=1".to_string()))
        );
        assert_eq!(
            split_token("=1"),
            Err(ArgError::MalformedToken("=1".to_string()))
        );
    }

    #[test]
    fn test_bare_invocation_returns_usage() {
        let outcome = parser().try_parse_from(["prog"]).unwrap();
        let ParseOutcome::Usage(usage) = outcome else {
            panic!("expected usage");
        };
        assert!(usage.starts_with("Usage: prog --stringArg --intArg\n[options]...\n"));
        assert!(usage.contains("\tdescription: a string,\n"));
    }

    #[test]
    fn test_empty_invocation_returns_usage() {
        let outcome = parser().try_parse_from(Vec::<String>::new()).unwrap();
        assert!(matches!(outcome, ParseOutcome::Usage(_)));
    }

    #[test]
    fn test_program_name_override() {
        let parser = parser().with_program_name("demo");
        assert!(parser.usage().starts_with("Usage: demo --stringArg"));
        let args = parsed(parser, &["/usr/bin/x", "--stringArg=a"]).unwrap();
        assert_eq!(args.program_name(), "demo");
    }

    #[test]
    fn test_value_may_contain_separator() {
        let args = parsed(parser(), &["prog", "--stringArg=k=v"]).unwrap();
        assert_eq!(args.get::<String>("--stringArg").unwrap(), "k=v");
    }

    #[test]
    fn test_unknown_short_name() {
        let err = parsed(parser(), &["prog", "-x=1"]).unwrap_err();
        assert_eq!(err, ArgError::UnknownArgument("-x".to_string()));
    }

    #[test]
    fn test_unknown_full_name() {
        let err = parsed(parser(), &["prog", "--nope=1"]).unwrap_err();
        assert_eq!(err, ArgError::UnknownArgument("--nope".to_string()));
    }

    #[test]
    fn test_duplicate_assignment_via_short_and_full() {
        let err = parsed(parser(), &["prog", "-i=2", "--intArg=3"]).unwrap_err();
        assert_eq!(err, ArgError::DuplicateAssignment("--intArg".to_string()));
    }

    #[test]
    fn test_first_error_wins() {
        let err = parsed(parser(), &["prog", "--intArg=x", "bad"]).unwrap_err();
        assert!(matches!(err, ArgError::TypeCast { .. }));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = parsed(parser(), &["prog", "-i=2"]).unwrap_err();
        assert_eq!(
            err,
            ArgError::MissingRequiredArgument("--stringArg".to_string())
        );
    }

    #[test]
    fn test_optional_without_default_fails_when_absent() {
        let mut parser = parser();
        parser.add(ArgDef::<u8>::optional("--level")).unwrap();
        let err = parsed(parser, &["prog", "--stringArg=a"]).unwrap_err();
        assert_eq!(err, ArgError::MissingDefault("--level".to_string()));
    }

    #[test]
    fn test_get_unknown_and_mismatched() {
        let args = parsed(parser(), &["prog", "--stringArg=a"]).unwrap();
        assert_eq!(
            args.get::<i32>("--missing"),
            Err(ArgError::UnknownArgument("--missing".to_string()))
        );
        assert_eq!(
            args.get::<i32>("stringArg"),
            Err(ArgError::UnknownArgument("stringArg".to_string()))
        );
        assert_eq!(
            args.get::<i64>("-i"),
            Err(ArgError::TypeMismatch {
                name: "--intArg".to_string(),
                requested: crate::ValueKind::I64,
                actual: crate::ValueKind::I32,
            })
        );
    }

    #[test]
    fn test_is_set_distinguishes_defaults() {
        let args = parsed(parser(), &["prog", "--stringArg=a"]).unwrap();
        assert_eq!(args.is_set("--stringArg"), Ok(true));
        assert_eq!(args.is_set("-i"), Ok(false));
        assert_eq!(args.get::<i32>("-i"), Ok(1));
    }

    #[test]
    fn test_values_in_registration_order() {
        let args = parsed(parser(), &["prog", "--stringArg=a", "-i=9"]).unwrap();
        assert_eq!(
            args.values(),
            vec![
                ("--stringArg".to_string(), Value::String("a".to_string())),
                ("--intArg".to_string(), Value::I32(9)),
            ]
        );
    }

    #[test]
    fn test_arguments_in_registration_order() {
        let parser = parser();
        let names = parser
            .arguments()
            .map(|a| (a.full_name(), a.short_name(), a.kind()))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                ("--stringArg", None, crate::ValueKind::String),
                ("--intArg", Some("-i"), crate::ValueKind::I32),
            ]
        );
    }

    #[test]
    fn test_describe() {
        let infos = parser().describe();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].full_name, "--stringArg");
        assert_eq!(infos[1].short_name.as_deref(), Some("-i"));
    }
}
