#[cfg(test)]
pub mod fixture;
pub mod preview;
pub mod upload;
