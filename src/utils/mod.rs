pub mod math;
pub mod memory;
