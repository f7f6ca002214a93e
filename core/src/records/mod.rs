pub mod filter;
pub mod index;
pub mod model;
pub mod parser;
