mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_all, handle_count, handle_create, handle_destroy, handle_show, handle_update,
};
