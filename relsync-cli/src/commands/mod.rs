pub mod diff;
pub mod update;
