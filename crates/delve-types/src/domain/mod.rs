pub mod research;
pub mod session;

pub use research::*;
pub use session::*;
