pub mod research_handlers;
pub mod system_handlers;

pub use research_handlers::*;
pub use system_handlers::*;
