pub mod line;
pub mod timeline;
pub mod turn;

pub use line::*;
pub use timeline::*;
pub use turn::*;
