pub mod memory;
pub mod tree;
