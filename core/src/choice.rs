//! Closed-set validation on top of a caster.
//!
//! A [`ChoiceValidator`] holds the permitted values declared for an argument
//! and checks every parsed token against them. Membership is exact `==`,
//! floating-point values included.

use tracing::debug;

use crate::cast::{Scalar, cast_from_string, cast_to_string};
use crate::error::{ArgError, Result};

/// Permitted-value check for one choice argument.
///
/// # Examples
///
/// ```
/// use typed_cmdline_core::{ArgError, ChoiceValidator};
///
/// let formats = ChoiceValidator::new("--format", vec!["json".to_string(), "yaml".to_string()])
///     .unwrap();
/// assert_eq!(formats.rendered(), "[json, yaml]");
/// assert_eq!(formats.validate("yaml").unwrap(), "yaml");
/// assert!(matches!(
///     formats.validate("toml"),
///     Err(ArgError::ChoiceViolation { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceValidator<T: Scalar> {
    name: String,
    values: Vec<T>,
    rendered: String,
}

impl<T: Scalar> ChoiceValidator<T> {
    /// Creates a validator for the argument `name` from the permitted values,
    /// kept in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::EmptyChoiceSet`] if `values` is empty.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(ArgError::EmptyChoiceSet(name));
        }

        let rendered = format!(
            "[{}]",
            values
                .iter()
                .map(cast_to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            name,
            values,
            rendered,
        })
    }

    /// Parses `token` and checks it against the permitted values.
    ///
    /// # Errors
    ///
    /// Propagates [`ArgError::TypeCast`] from the caster, or returns
    /// [`ArgError::ChoiceViolation`] naming the argument, the permitted set,
    /// and the token.
    pub fn validate(&self, token: &str) -> Result<T> {
        let value = cast_from_string::<T>(token)?;
        if !self.contains(&value) {
            debug!(argument = %self.name, token, choices = %self.rendered, "Rejected choice");
            return Err(ArgError::ChoiceViolation {
                name: self.name.clone(),
                choices: self.rendered.clone(),
                token: token.to_string(),
            });
        }
        Ok(value)
    }

    /// Whether `value` is one of the permitted values.
    pub fn contains(&self, value: &T) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// The permitted values in declaration order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The permitted set rendered as `[a, b, c]`.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

#[cfg(test)]
mod tests {
    use crate::ValueKind;

    use super::*;

    #[test]
    fn test_rendered_keeps_declaration_order() {
        let choices = ChoiceValidator::new("--floatArg", vec![0.1f32, 0.01, 0.001]).unwrap();
        assert_eq!(choices.rendered(), "[0.1, 0.01, 0.001]");

        let choices = ChoiceValidator::new("--level", vec![3, 1, 2]).unwrap();
        assert_eq!(choices.rendered(), "[3, 1, 2]");
    }

    #[test]
    fn test_validate_accepts_member() {
        let choices = ChoiceValidator::new("--floatArg", vec![0.1f32, 0.01, 0.001]).unwrap();
        assert_eq!(choices.validate("0.01"), Ok(0.01));
    }

    #[test]
    fn test_validate_rejects_non_member() {
        let choices = ChoiceValidator::new("--floatArg", vec![0.1f32, 0.01, 0.001]).unwrap();
        let err = choices.validate("0.5").unwrap_err();
        assert_eq!(
            err,
            ArgError::ChoiceViolation {
                name: "--floatArg".to_string(),
                choices: "[0.1, 0.01, 0.001]".to_string(),
                token: "0.5".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "argument --floatArg should be in [0.1, 0.01, 0.001], got 0.5"
        );
    }

    #[test]
    fn test_validate_propagates_cast_failure() {
        let choices = ChoiceValidator::new("--level", vec![1i32, 2]).unwrap();
        assert_eq!(
            choices.validate("one"),
            Err(ArgError::TypeCast {
                target: ValueKind::I32,
                token: "one".to_string()
            })
        );
    }

    #[test]
    fn test_float_membership_is_exact() {
        let computed = 0.1f64 + 0.2;
        let choices = ChoiceValidator::new("--ratio", vec![computed]).unwrap();

        // The literal 0.3 is not bitwise equal to 0.1 + 0.2.
        assert!(choices.validate("0.3").is_err());
        assert_eq!(choices.validate(&computed.to_string()), Ok(computed));

        let choices = ChoiceValidator::new("--ratio", vec![0.1f64 + 0.0]).unwrap();
        assert_eq!(choices.validate("0.1"), Ok(0.1));
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert_eq!(
            ChoiceValidator::<i32>::new("--level", vec![]).unwrap_err(),
            ArgError::EmptyChoiceSet("--level".to_string())
        );
    }
}
