//! # Jobly - Companies and Jobs API
//!
//! A REST service over companies and the jobs they post, backed by
//! PostgreSQL and built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core business logic (entities, value objects, domain errors)
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: Postgres repositories and the SQL clause builders
//! - **API**: HTTP handlers and middleware
//!
//! ## Key Features
//!
//! - Partial updates and filtered searches rendered as parameterized SQL
//! - JWT authentication with admin-only writes
//! - Typed nulls, so clearing a nullable column binds the column's own type
//!
//! ## Example Usage
//!
//! ```no_run
//! use jobly::{api::create_router, ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_infrastructure()?
//!     .build()?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
