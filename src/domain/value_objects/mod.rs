mod company_handle;
mod criteria;
mod equity;
mod field_value;
mod job_id;

pub use company_handle::CompanyHandle;
pub use criteria::Criteria;
pub use equity::Equity;
pub use field_value::{FieldKind, FieldValue};
pub use job_id::JobId;
