pub mod assertions;
pub mod record_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{line_for, row_for, RankingAssertion};
#[allow(unused_imports)]
pub use record_builders::{EventBuilder, GameBuilder};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
