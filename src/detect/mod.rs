pub mod context;
pub mod items;
pub mod label;
pub mod patterns;
