//! Service layer: the persistence abstraction and the asset pipeline.
//! - `store`: one repository contract over the durable document store and the
//!   in-process fallback, selected once at startup.
//! - `assets`: upload validation/normalization and URL resolution.
//! - `users` / `dishes`: business operations on top of both.

pub mod assets;
pub mod dishes;
pub mod errors;
pub mod seed;
pub mod store;
pub mod users;
