pub mod action;
pub mod snapshot;
pub mod strategy;
