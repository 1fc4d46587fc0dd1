//! Ownership and name resolution for declared arguments.

use std::collections::HashMap;

use crate::argument::Argument;
use crate::error::{ArgError, Result};

/// Owns every declared argument and maps names to them.
///
/// Arguments are kept in registration order, which is the order usage text
/// lists them in. Full names and non-empty short names are unique.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    arguments: Vec<Box<dyn Argument>>,
    by_full_name: HashMap<String, usize>,
    short_to_full: HashMap<String, String>,
}

impl Registry {
    pub(crate) fn insert(&mut self, argument: Box<dyn Argument>) -> Result<()> {
        let full_name = argument.full_name().to_string();
        if self.by_full_name.contains_key(&full_name) {
            return Err(ArgError::DuplicateDefinition(full_name));
        }
        if let Some(short) = argument.short_name() {
            if self.short_to_full.contains_key(short) {
                return Err(ArgError::DuplicateDefinition(short.to_string()));
            }
            self.short_to_full
                .insert(short.to_string(), full_name.clone());
        }

        self.by_full_name.insert(full_name, self.arguments.len());
        self.arguments.push(argument);
        Ok(())
    }

    /// Resolves `name` (`--full` or `-short`) to an index into `arguments`.
    pub(crate) fn resolve(&self, name: &str) -> Result<usize> {
        let full_name = if name.starts_with("--") {
            name
        } else if name.starts_with('-') {
            self.short_to_full
                .get(name)
                .map(String::as_str)
                .ok_or_else(|| ArgError::UnknownArgument(name.to_string()))?
        } else {
            return Err(ArgError::UnknownArgument(name.to_string()));
        };

        self.by_full_name
            .get(full_name)
            .copied()
            .ok_or_else(|| ArgError::UnknownArgument(full_name.to_string()))
    }

    pub(crate) fn get(&self, name: &str) -> Result<&dyn Argument> {
        let index = self.resolve(name)?;
        Ok(self.arguments[index].as_ref())
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut dyn Argument> {
        let index = self.resolve(name)?;
        Ok(self.arguments[index].as_mut())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Argument> {
        self.arguments.iter().map(|a| a.as_ref())
    }

    pub(crate) fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Renders the full usage text for `program`.
    pub(crate) fn usage(&self, program: &str) -> String {
        let required = self
            .iter()
            .filter(|a| a.required())
            .map(|a| a.full_name())
            .collect::<Vec<_>>();

        let mut text = format!("Usage: {program}");
        if !required.is_empty() {
            text.push(' ');
            text.push_str(&required.join(" "));
        }
        text.push_str("\n[options]...\n");

        for argument in self.iter() {
            text.push_str(&argument.usage_text());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use crate::ArgDef;

    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry
            .insert(ArgDef::<String>::required("--stringArg").into_argument().unwrap())
            .unwrap();
        registry
            .insert(
                ArgDef::<i32>::required("--intArg")
                    .with_short("-i")
                    .with_default(1)
                    .into_argument()
                    .unwrap(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_resolve_full_and_short_names() {
        let registry = registry();
        assert_eq!(registry.resolve("--stringArg"), Ok(0));
        assert_eq!(registry.resolve("--intArg"), Ok(1));
        assert_eq!(registry.resolve("-i"), Ok(1));
    }

    #[test]
    fn test_resolve_unknown_names() {
        let registry = registry();
        assert_eq!(
            registry.resolve("--missing"),
            Err(ArgError::UnknownArgument("--missing".to_string()))
        );
        assert_eq!(
            registry.resolve("-s"),
            Err(ArgError::UnknownArgument("-s".to_string()))
        );
        assert_eq!(
            registry.resolve("intArg"),
            Err(ArgError::UnknownArgument("intArg".to_string()))
        );
    }

    #[test]
    fn test_duplicate_full_name_rejected_regardless_of_type() {
        let mut registry = registry();
        let err = registry
            .insert(ArgDef::<bool>::optional("--stringArg").into_argument().unwrap())
            .unwrap_err();
        assert_eq!(err, ArgError::DuplicateDefinition("--stringArg".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_short_name_rejected() {
        let mut registry = registry();
        let err = registry
            .insert(
                ArgDef::<f64>::optional("--other")
                    .with_short("-i")
                    .into_argument()
                    .unwrap(),
            )
            .unwrap_err();
        assert_eq!(err, ArgError::DuplicateDefinition("-i".to_string()));
        assert!(registry.resolve("--other").is_err());
    }

    #[test]
    fn test_usage_lists_required_names_in_registration_order() {
        let usage = registry().usage("prog");
        assert!(usage.starts_with("Usage: prog --stringArg --intArg\n[options]...\n"));
        let string_pos = usage.find("fullName: --stringArg").unwrap();
        let int_pos = usage.find("fullName: --intArg").unwrap();
        assert!(string_pos < int_pos);
    }
}
