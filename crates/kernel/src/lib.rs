//! Core traits, settings, and the module registry shared by every estate crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, RouteInfo};
pub use registry::ModuleRegistry;
