pub mod detail;
pub mod render;
