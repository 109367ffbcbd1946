#[cfg(test)]
pub mod common;
