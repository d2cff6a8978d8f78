mod company;
mod job;
mod patch;

pub use company::Company;
pub use job::{Job, NewJob};
pub use patch::Patch;
