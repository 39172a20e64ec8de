pub mod lesson;
pub mod macros;
pub mod order;
pub mod search;

pub use lesson::*;
pub use order::*;
pub use search::*;
