//! Filters that apply declared documentation metadata.
//!
//! - [`operation::OperationResolver`] fills summary, notes, tags and the
//!   response type of an operation
//! - [`parameter::ParameterResolver`] fills name, description, defaults and
//!   allowable values of a parameter
//!
//! Both accept an explicit model declaration only when it agrees with the
//! statically inferred type, and register accepted models with the
//! controller.

pub mod operation;
pub mod parameter;

pub use operation::OperationResolver;
pub use parameter::ParameterResolver;
