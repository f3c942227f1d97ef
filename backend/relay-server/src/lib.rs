pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod timing;


pub use crate::bootstrap::AppContext;
pub use crate::cli::Cli;
pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::routes::build_router;
pub use crate::timing::timed;
