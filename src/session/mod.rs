pub mod manager;
pub mod session;

pub use manager::TokenManager;
pub use session::Session;
