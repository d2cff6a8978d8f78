//! Lookup-key parsing shared by the company and job use cases
//!
//! A key that cannot name a record is treated the same as a key that names
//! nothing: the lookup fails with `NotFound`.

use std::str::FromStr;

use crate::application::errors::UseCaseError;
use crate::domain::value_objects::{CompanyHandle, JobId};

pub fn parse_company_handle(raw: &str) -> Result<CompanyHandle, UseCaseError> {
    CompanyHandle::new(raw.to_string()).map_err(|_| no_company(raw))
}

pub fn parse_job_id(raw: &str) -> Result<JobId, UseCaseError> {
    JobId::from_str(raw).map_err(|_| no_job(raw))
}

pub fn no_company(handle: impl std::fmt::Display) -> UseCaseError {
    UseCaseError::NotFound(format!("No company: {handle}"))
}

pub fn no_job(id: impl std::fmt::Display) -> UseCaseError {
    UseCaseError::NotFound(format!("No job: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_handle_is_not_found() {
        let err = parse_company_handle("Not A Handle").unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound(ref m) if m == "No company: Not A Handle"));
        assert!(parse_company_handle("c1").is_ok());
    }

    #[test]
    fn test_malformed_job_id_is_not_found() {
        let err = parse_job_id("nope").unwrap_err();
        assert!(matches!(err, UseCaseError::NotFound(ref m) if m == "No job: nope"));
        assert_eq!(parse_job_id("12").unwrap().value(), 12);
    }
}
