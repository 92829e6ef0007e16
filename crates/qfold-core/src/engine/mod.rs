pub mod clustering;
pub mod error;
pub mod evaluator;
pub mod order;
pub mod progress;
pub mod scanner;
pub mod smoothing;
pub mod split;
pub mod window;
