pub mod clean;
pub mod dates;
pub mod error;
pub mod io;
pub mod model;
pub mod process;
pub mod reconcile;
pub mod sink;
pub mod validate;

pub use error::{CheckerError, Result};
