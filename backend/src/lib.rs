//! Banking backend: users with embedded bank accounts, served over HTTP.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the document model,
//! the balance rules, and the services behind the driving ports;
//! [`inbound`] adapts them to actix-web; [`outbound`] stores user documents
//! in PostgreSQL or in memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
