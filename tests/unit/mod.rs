/// Unit test target: domain types and metrics through the public API
mod basic_tests;
