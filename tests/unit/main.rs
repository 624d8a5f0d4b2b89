//! Unit-level integration tests against the public API.

mod config_tests;
mod parser_tests;
mod search_tests;
