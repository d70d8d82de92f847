pub mod inspect_cmd;
pub mod query_cmd;
pub mod watch_cmd;

pub use inspect_cmd::cmd_inspect;
pub use query_cmd::cmd_query;
pub use watch_cmd::cmd_watch;
