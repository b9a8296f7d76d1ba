//! Estate application library
//!
//! Housing unit and resident profile modules plus the bootstrap that serves them.

pub mod app;
pub mod common;
pub mod modules;

pub use common::{crud::CrudService, id::NumericId};
