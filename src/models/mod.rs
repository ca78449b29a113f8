//! Model layer
//!
//! Typed names for the resource kinds the extraction rules understand.

pub mod resource_kind;

pub use resource_kind::ResourceKind;
