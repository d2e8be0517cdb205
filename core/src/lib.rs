pub mod adapter;
pub mod apply;
pub mod runner;
