//! Integration tests for field markup scanning, parsing and round trips

mod config_tests;
mod document_tests;
mod roundtrip_tests;
mod scanner_tests;
