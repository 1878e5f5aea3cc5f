pub mod selection;
pub mod tracker;
