pub mod classify;
pub mod grouping;
pub mod model;
