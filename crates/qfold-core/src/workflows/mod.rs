pub mod analyze;
pub mod cluster;
