use serde_json::{Map, Value};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{FieldKind, FieldValue};

/// Ordered set of field changes for a partial update.
///
/// Field names stay in their external (camelCase) form; translating them to
/// column names is the persistence layer's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Vec<(&'static str, FieldValue)>);

impl Patch {
    /// Parse a JSON object against a table of writable fields.
    ///
    /// Keys listed in `immutable` are rejected as such, any other key not in
    /// `writable` is rejected as unknown. Order of the payload is preserved.
    pub fn parse(
        data: &Map<String, Value>,
        writable: &[(&'static str, FieldKind)],
        immutable: &[&str],
    ) -> Result<Self, DomainError> {
        let mut changes = Vec::with_capacity(data.len());
        for (key, value) in data {
            if immutable.contains(&key.as_str()) {
                return Err(DomainError::ImmutableField(key.clone()));
            }
            let (name, kind) = writable
                .iter()
                .find(|(name, _)| *name == key.as_str())
                .ok_or_else(|| DomainError::UnknownField(key.clone()))?;
            changes.push((*name, kind.parse(name, value)?));
        }
        Ok(Self(changes))
    }

    pub fn with(mut self, name: &'static str, value: FieldValue) -> Self {
        self.0.push((name, value));
        self
    }

    pub fn changes(&self) -> &[(&'static str, FieldValue)] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
