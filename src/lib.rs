pub mod classifiers;
pub mod core;
pub mod evaluation;
pub mod streams;
pub mod tasks;
pub mod ui;
pub mod utils;
