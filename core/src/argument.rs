//! Argument declarations and their parse-time state.
//!
//! An argument carries immutable declaration data (names, description,
//! required flag, default) plus the mutable state written by a parse pass.
//! Two variants share the [`Argument`] contract:
//!
//! - [`BasicArgument`] accepts any token its caster can convert.
//! - [`ChoiceArgument`] additionally restricts values to a declared set.
//!
//! Arguments are declared through the [`ArgDef`] builder.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cast::{Scalar, Value, ValueKind, cast_from_string};
use crate::choice::ChoiceValidator;
use crate::error::{ArgError, Result};
use crate::validate::validate_names;

/// Capability contract shared by every argument variant.
///
/// Arguments are owned by the registry as `Box<dyn Argument>`; values leave
/// through [`value`](Argument::value) as a tagged [`Value`] so typed
/// retrieval can be checked.
pub trait Argument: fmt::Debug + Send + Sync {
    /// Full name, including the `--` prefix.
    fn full_name(&self) -> &str;

    /// Short name, including the `-` prefix, if one was declared.
    fn short_name(&self) -> Option<&str>;

    fn description(&self) -> &str;

    fn required(&self) -> bool;

    /// Value type this argument was declared with.
    fn kind(&self) -> ValueKind;

    fn has_default(&self) -> bool;

    fn is_set(&self) -> bool;

    /// Multi-line usage block for this argument.
    fn usage_text(&self) -> String;

    /// Converts `token` and stores it, marking the argument set.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::TypeCast`] or [`ArgError::ChoiceViolation`]. A
    /// failed read leaves the argument unset.
    fn read(&mut self, token: &str) -> Result<()>;

    /// The stored value if set, else the default.
    fn value(&self) -> Value;

    /// Serializable snapshot of the declaration.
    fn info(&self) -> ArgumentInfo;

    /// Returns `Ok(true)` when the argument has been set or has a default.
    ///
    /// An argument that has neither is an error even when it is optional:
    /// [`ArgError::MissingRequiredArgument`] for required arguments and
    /// [`ArgError::MissingDefault`] otherwise.
    fn is_ready(&self) -> Result<bool> {
        if self.is_set() || self.has_default() {
            return Ok(true);
        }
        let name = self.full_name().to_string();
        if self.required() {
            Err(ArgError::MissingRequiredArgument(name))
        } else {
            Err(ArgError::MissingDefault(name))
        }
    }
}

/// Serializable description of a declared argument.
///
/// # Examples
///
/// ```
/// use typed_cmdline_core::{ArgDef, Value, ValueKind};
///
/// let arg = ArgDef::<i32>::required("--intArg")
///     .with_short("-i")
///     .with_default(1)
///     .into_argument()
///     .unwrap();
/// let info = arg.info();
/// assert_eq!(info.kind, ValueKind::I32);
/// assert_eq!(info.default, Some(Value::I32(1)));
/// assert!(info.choices.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    /// Full name (e.g., `--output`)
    pub full_name: String,
    /// Short name (e.g., `-o`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub description: String,
    pub required: bool,
    pub kind: ValueKind,
    /// Default value, if one counts as set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Permitted values for choice arguments, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
}

/// Registration-time description of an argument.
///
/// Mirrors the declaration parameters of a registration call: full name,
/// short name, description, required flag, default, and permitted values.
/// A default that is blank for its type (zero, `false`, or the empty string)
/// does not count as a default. An empty choice list yields a
/// [`BasicArgument`], a non-empty one a [`ChoiceArgument`].
///
/// # Examples
///
/// ```
/// use typed_cmdline_core::ArgDef;
///
/// let def = ArgDef::<f32>::optional("--floatArg")
///     .with_short("-f")
///     .with_description("sampling ratio")
///     .with_default(0.1)
///     .with_choices([0.1, 0.01, 0.001]);
///
/// let arg = def.into_argument().unwrap();
/// assert_eq!(arg.short_name(), Some("-f"));
/// assert!(arg.has_default());
/// assert!(arg.usage_text().contains("choice from: [0.1, 0.01, 0.001]"));
/// ```
#[derive(Debug, Clone)]
pub struct ArgDef<T: Scalar> {
    full_name: String,
    short_name: Option<String>,
    description: String,
    required: bool,
    default: T,
    choices: Vec<T>,
}

impl<T: Scalar> ArgDef<T> {
    fn new(full_name: &str, required: bool) -> Self {
        Self {
            full_name: full_name.to_string(),
            short_name: None,
            description: String::new(),
            required,
            default: T::default(),
            choices: Vec::new(),
        }
    }

    /// Declares a required argument.
    pub fn required(full_name: &str) -> Self {
        Self::new(full_name, true)
    }

    /// Declares an optional argument.
    pub fn optional(full_name: &str) -> Self {
        Self::new(full_name, false)
    }

    /// Sets the short name. An empty string means no short name.
    pub fn with_short(mut self, short_name: &str) -> Self {
        self.short_name = (!short_name.is_empty()).then(|| short_name.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: T) -> Self {
        self.default = value;
        self
    }

    /// Restricts the argument to the given values.
    pub fn with_choices(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.choices = values.into_iter().collect();
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    /// Builds the argument variant this declaration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::InvalidFullName`] or
    /// [`ArgError::InvalidShortName`] for malformed names.
    pub fn into_argument(self) -> Result<Box<dyn Argument>> {
        validate_names(&self.full_name, self.short_name.as_deref())?;

        let basic = BasicArgument::new(
            self.full_name,
            self.short_name,
            self.description,
            self.required,
            self.default,
        );

        if self.choices.is_empty() {
            return Ok(Box::new(basic));
        }

        let validator = ChoiceValidator::new(basic.full_name.clone(), self.choices)?;
        Ok(Box::new(ChoiceArgument {
            inner: basic,
            validator,
        }))
    }
}

/// An argument restricted only by its value type.
#[derive(Debug, Clone)]
pub struct BasicArgument<T: Scalar> {
    full_name: String,
    short_name: Option<String>,
    description: String,
    required: bool,
    default: Option<T>,
    actual: T,
    set: bool,
}

impl<T: Scalar> BasicArgument<T> {
    fn new(
        full_name: String,
        short_name: Option<String>,
        description: String,
        required: bool,
        default: T,
    ) -> Self {
        let default = (!default.is_blank()).then_some(default);
        let actual = default.clone().unwrap_or_default();
        Self {
            full_name,
            short_name,
            description,
            required,
            default,
            actual,
            set: false,
        }
    }

    fn store(&mut self, value: T) {
        debug!(argument = %self.full_name, value = ?value, "Stored argument value");
        self.actual = value;
        self.set = true;
    }
}

impl<T: Scalar> Argument for BasicArgument<T> {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn required(&self) -> bool {
        self.required
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn has_default(&self) -> bool {
        self.default.is_some()
    }

    fn is_set(&self) -> bool {
        self.set
    }

    fn usage_text(&self) -> String {
        let mut text = format!(
            "\tfullName: {},\n\tshortName: {},\n\tdescription: {},\n\trequired: {},\n",
            self.full_name,
            self.short_name.as_deref().unwrap_or_default(),
            self.description,
            self.required,
        );
        if let Some(default) = &self.default {
            text.push_str(&format!("\tdefaultValue: {},\n", default.cast_to_string()));
        }
        text
    }

    fn read(&mut self, token: &str) -> Result<()> {
        let value = cast_from_string::<T>(token)?;
        self.store(value);
        Ok(())
    }

    fn value(&self) -> Value {
        self.actual.clone().into_value()
    }

    fn info(&self) -> ArgumentInfo {
        ArgumentInfo {
            full_name: self.full_name.clone(),
            short_name: self.short_name.clone(),
            description: self.description.clone(),
            required: self.required,
            kind: T::KIND,
            default: self.default.clone().map(Scalar::into_value),
            choices: None,
        }
    }
}

/// An argument whose values must come from a declared set.
#[derive(Debug, Clone)]
pub struct ChoiceArgument<T: Scalar> {
    inner: BasicArgument<T>,
    validator: ChoiceValidator<T>,
}

impl<T: Scalar> Argument for ChoiceArgument<T> {
    fn full_name(&self) -> &str {
        self.inner.full_name()
    }

    fn short_name(&self) -> Option<&str> {
        self.inner.short_name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn required(&self) -> bool {
        self.inner.required()
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn has_default(&self) -> bool {
        self.inner.has_default()
    }

    fn is_set(&self) -> bool {
        self.inner.is_set()
    }

    fn usage_text(&self) -> String {
        format!(
            "{}\tchoice from: {}\n",
            self.inner.usage_text(),
            self.validator.rendered()
        )
    }

    fn read(&mut self, token: &str) -> Result<()> {
        let value = self.validator.validate(token)?;
        self.inner.store(value);
        Ok(())
    }

    fn value(&self) -> Value {
        self.inner.value()
    }

    fn info(&self) -> ArgumentInfo {
        ArgumentInfo {
            choices: Some(
                self.validator
                    .values()
                    .iter()
                    .cloned()
                    .map(Scalar::into_value)
                    .collect(),
            ),
            ..self.inner.info()
        }
    }
}
