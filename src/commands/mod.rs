pub mod check;
pub mod config;
pub mod fix;
pub mod graph;
pub mod init;
pub mod list;

pub use check::handle_check;
pub use config::handle_config;
pub use fix::handle_fix;
pub use graph::handle_graph;
pub use init::handle_init;
pub use list::handle_list;
