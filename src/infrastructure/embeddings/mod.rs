pub mod http;
pub mod unavailable;
