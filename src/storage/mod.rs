//! Project persistence
//!
//! A document store keyed by user id. Saves replace the whole document; two
//! concurrent saves for the same user race with last-write-wins, which is the
//! accepted consistency model.

mod json;
mod traits;

pub use json::JsonProjectStore;
pub use traits::ProjectStore;
