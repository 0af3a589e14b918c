mod length;
mod range;
mod url;

pub use length::*;
pub use range::*;
pub use url::*;
