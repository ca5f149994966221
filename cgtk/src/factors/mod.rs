mod traits;
mod utils;

pub use self::traits::*;
pub use self::utils::*;
