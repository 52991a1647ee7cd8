//! Test doubles shared by unit tests, integration tests and the behaviour
//! suites. Compiled for `cfg(test)` and the `test-support` feature.

mod in_memory_store;

pub use in_memory_store::InMemoryOrderStore;
