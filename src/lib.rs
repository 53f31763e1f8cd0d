pub mod config;
pub mod core;
pub mod diagnostics;
pub mod export;
pub mod layout;
pub mod ocr;
pub mod pipeline;
pub mod source;

pub use config::{IndentUnit, Options, PipelineConfig, ReadingOrder};
pub use crate::core::geometry::Quad;
pub use crate::core::model::{DocumentReport, PageImage, TextObservation};
pub use layout::{reconstruct, reconstruct_into, Reconstruction};
pub use pipeline::PageAggregator;
