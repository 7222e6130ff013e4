//! Case-insensitive key lookup over a schema

use std::collections::HashMap;

use crate::errors::ConfigurationError;
use crate::schema::{ArgumentSchema, ParameterDescriptor};

/// Index of the synthesized help descriptor
pub const HELP_INDEX: usize = 0;

/// Every registered key mapped to its descriptor
///
/// Descriptors are stored once; both keys of a parameter refer to the same
/// index. The help descriptor always sits at [`HELP_INDEX`], followed by the
/// declared parameters in declaration order.
#[derive(Debug)]
pub struct SchemaTable<T> {
    details: Option<String>,
    descriptors: Vec<ParameterDescriptor<T>>,
    keys: HashMap<String, usize>,
}

impl<T> SchemaTable<T> {
    /// Register the help keys and every declared key
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateKey`] for the first key that is
    /// already registered, compared case-insensitively. This includes the
    /// reserved `h` and `help` keys.
    pub fn build(schema: ArgumentSchema<T>) -> Result<Self, ConfigurationError> {
        let (details, params) = schema.into_parts();
        let mut descriptors = Vec::with_capacity(params.len() + 1);
        descriptors.push(ParameterDescriptor::help());
        descriptors.extend(params);

        let mut keys = HashMap::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            for key in descriptor.spec().keys() {
                if keys.insert(normalize(key), index).is_some() {
                    return Err(ConfigurationError::DuplicateKey(key.to_string()));
                }
            }
        }

        Ok(Self {
            details,
            descriptors,
            keys,
        })
    }

    /// Look up a key as typed
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<usize> {
        self.keys.get(&normalize(key)).copied()
    }

    /// Descriptor at `index`
    #[must_use]
    pub fn descriptor(&self, index: usize) -> Option<&ParameterDescriptor<T>> {
        self.descriptors.get(index)
    }

    /// All descriptors, help first, then in declaration order
    #[must_use]
    pub fn descriptors(&self) -> &[ParameterDescriptor<T>] {
        &self.descriptors
    }

    /// Type-level description
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Number of registered keys
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}
