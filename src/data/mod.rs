//! Data module - CSV loading and column extraction

mod loader;
mod processor;

pub use loader::DataLoader;
pub use processor::{DataProcessor, ProcessorError};
