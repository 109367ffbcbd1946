pub mod codec;
pub mod types;

pub use types::{Page, Resource, ResourceKind};
