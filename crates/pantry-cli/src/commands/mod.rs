pub mod init;
pub mod items;
pub mod list;
pub mod misc;

pub use init::handle_init;
pub use items::{handle_add, handle_remove, handle_show};
pub use list::handle_list;
pub use misc::handle_completions;
