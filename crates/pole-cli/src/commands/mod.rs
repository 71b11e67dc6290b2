pub mod associate;
pub mod batch;
pub mod number;
