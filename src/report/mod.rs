//! Reports: definitions, factory, and join resolution.
//!
//! A [`ReportDefinition`] is a declarative value: output field names, a
//! [`Query`](crate::query::Query), and a transform from raw rows to keyed
//! records. The [`ReportFactory`] binds definitions to an API client and a
//! leaf-account scope, producing [`Report`] instances whose `fetch()`
//! resolves declared joins by prefetching child reports filtered to the
//! observed key set.

mod definition;
mod error;
mod factory;
#[allow(clippy::module_inception)]
mod report;

pub use definition::{
    field, join_field, JoinRecords, Record, ReportDefinition, ResolvedJoins,
};
pub use error::{ReportError, ReportResult};
pub use factory::ReportFactory;
pub use report::Report;
