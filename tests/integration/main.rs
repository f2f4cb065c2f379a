//! Integration tests against the JSON file store

mod lending_tests;
mod persistence_tests;
