pub mod strategy;
pub mod transition;

pub use strategy::SearchStrategy;
pub use transition::TransitionFn;
