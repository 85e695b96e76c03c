pub mod protocol;
pub mod session;
pub mod transport;

#[cfg(feature = "http")]
pub mod http;
