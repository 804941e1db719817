mod basehit;
mod hit;
mod buffer;
mod error;

pub use basehit::*;
pub use hit::*;
pub use buffer::*;
pub use error::*;
