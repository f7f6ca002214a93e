pub mod config;
pub mod ner;
pub mod records;
pub mod viewer;
pub mod xray;

pub mod error;
