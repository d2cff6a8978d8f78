use serde_json::{Map, Value};

use crate::domain::entities::Patch;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CompanyHandle, FieldKind};

/// Company entity
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    handle: CompanyHandle,
    name: String,
    description: Option<String>,
    num_employees: Option<i32>,
    logo_url: Option<String>,
}

impl Company {
    /// Fields a partial update may change; `handle` is the key and never changes
    pub const UPDATABLE_FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("name", FieldKind::Text),
        ("description", FieldKind::OptionalText),
        ("numEmployees", FieldKind::OptionalCount),
        ("logoUrl", FieldKind::OptionalText),
    ];

    pub const IMMUTABLE_FIELDS: &'static [&'static str] = &["handle"];

    pub fn new(
        handle: CompanyHandle,
        name: String,
        description: Option<String>,
        num_employees: Option<i32>,
        logo_url: Option<String>,
    ) -> Self {
        Self {
            handle,
            name,
            description,
            num_employees,
            logo_url,
        }
    }

    pub fn parse_patch(data: &Map<String, Value>) -> Result<Patch, DomainError> {
        Patch::parse(data, Self::UPDATABLE_FIELDS, Self::IMMUTABLE_FIELDS)
    }

    pub fn handle(&self) -> &CompanyHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn num_employees(&self) -> Option<i32> {
        self.num_employees
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }
}
