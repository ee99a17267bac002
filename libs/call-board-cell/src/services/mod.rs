pub mod board;
pub mod broadcast;
pub mod call;
pub mod display;
pub mod queue;
pub mod registry;

pub use board::*;
pub use broadcast::*;
pub use call::*;
pub use display::*;
pub use queue::*;
pub use registry::*;
