pub mod order;
pub mod reconstruct;

pub use order::arrange;
pub use reconstruct::{reconstruct, reconstruct_into, Reconstruction};
