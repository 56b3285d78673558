pub mod host;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod viewport;
