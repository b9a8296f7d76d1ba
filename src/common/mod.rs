//! Building blocks shared by the resource modules.

pub mod crud;
pub mod id;
pub mod store;
