pub mod executor;
pub mod transport;

pub use executor::RequestExecutor;
pub use transport::build_http_client;
