//! Query Executor subsystem for gridquery
//!
//! The executor interprets plan stages against a collection capability
//! and produces one page of grid data.
//!
//! # Execution Flow (strict order, as planned)
//!
//! 1. Count the unfiltered collection
//! 2. Fetch filtered rows from the collection
//! 3. Count the filtered rows
//! 4. Slice, merge row ids and defaults, sort, project
//!
//! # Adapters
//!
//! A data store plugs in by implementing [`Collection`] or
//! [`AsyncCollection`]. [`MemoryCollection`] is the in-process adapter.

mod async_executor;
mod collection;
mod errors;
mod executor;
mod filters;
mod result;
mod sorter;

pub use async_executor::AsyncQueryExecutor;
pub use collection::{AsyncCollection, Collection, MemoryCollection};
pub use errors::{CollectionError, CollectionResult, ExecutorError, ExecutorResult};
pub use executor::QueryExecutor;
pub use filters::{coerce_to_string, SearchMatcher};
pub use result::GridResponse;
pub use sorter::RowSorter;
