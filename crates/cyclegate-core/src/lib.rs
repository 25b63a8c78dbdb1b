#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod outcome;
pub mod store;

pub use outcome::InsertOutcome;
pub use store::{DEFAULT_NODE_COUNT, LinkStore, WindowError};

/// Returns the current version of the cyclegate-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
