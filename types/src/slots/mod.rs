mod constants;
mod error;
mod roll;
mod session;
mod symbol;

pub use constants::*;
pub use error::*;
pub use roll::*;
pub use session::*;
pub use symbol::*;

#[cfg(test)]
mod tests;
