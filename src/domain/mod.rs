pub mod authorization;
pub mod entities;
pub mod errors;
pub mod value_objects;
