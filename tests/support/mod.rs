// tests/support/mod.rs
// Shared by several integration test binaries; not every binary uses every
// helper, which would otherwise trip dead_code / unused_imports.
#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(unused_imports)]
pub use mocks::*;

#[allow(unused_imports)]
pub use helpers::*;
