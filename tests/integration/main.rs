//! Integration tests for doc-outline
//!
//! These tests use wiremock to serve small documentation sites and exercise the
//! crawl and extraction stages end-to-end.

mod crawl_tests;
mod extract_tests;
