// Trapper Battle Schema - Shared type definitions
// This crate contains the closed data types that the battle engine and its
// collaborators (inventory, persistence) agree on. It holds no engine logic.

// Re-export the main types
pub use element_types::*;
pub use item_data::*;
pub use move_data::*;

pub mod element_types;
pub mod item_data;
pub mod move_data;
