//! # Rollcall Admin
//!
//! Account administration for the attendance system.
//!
//! ## Components
//!
//! - `ProfileStore` - Port for the account table
//! - `InMemoryProfileStore` - Thread-safe in-memory adapter
//! - `AccountAdmin` - List/create/delete/change-role gated by the role hierarchy

pub mod profile_store;
pub mod in_memory;
pub mod account_admin;

pub use account_admin::{AccountAdmin, NewProfile};
pub use in_memory::InMemoryProfileStore;
pub use profile_store::{Profile, ProfileFilter, ProfileStore, StoreError};
