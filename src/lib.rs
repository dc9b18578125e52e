/// HTTP data types for captured requests.
pub mod common;
/// Components for building and deriving request snapshots.
pub mod builder;
