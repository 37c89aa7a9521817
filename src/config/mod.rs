pub mod http;
pub mod net;

pub use http::HttpConfig;
pub use net::{DnsConfig, TcpConfig, TlsCertConfig};
