pub mod sea_generator;
mod stream;

pub use sea_generator::{SeaGenerator, SeaParameters};
pub use stream::Stream;
