pub mod config;
pub mod listeners;
pub mod narrator;
