pub mod client;
pub mod device;
pub mod error;
pub mod stream;

pub use client::*;
pub use device::*;
pub use error::*;
pub use stream::*;
