pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::StorageConfig;
pub use entity::{BaseModel, Model, ModelKind, Record, User};
pub use error::{HbnbError, Result};
pub use storage::{FileStorage, Storage};
