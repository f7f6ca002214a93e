pub mod descriptions;
pub mod model;
pub mod ranking;
