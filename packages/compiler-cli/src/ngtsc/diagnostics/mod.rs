pub mod src {
    pub mod error;
    pub mod error_code;
    pub mod format;
    pub mod util;
}

pub use src::error::*;
pub use src::error_code::*;
pub use src::format::*;
pub use src::util::*;
