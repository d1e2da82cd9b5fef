pub mod counters;
pub mod history;
pub mod report;
pub mod session;
pub mod ticker;
pub mod viewer;

pub use counters::*;
pub use history::*;
pub use report::*;
pub use session::*;
pub use ticker::*;
pub use viewer::*;
