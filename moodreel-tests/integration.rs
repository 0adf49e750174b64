//! Integration tests for Moodreel
//!
//! These tests run the real OMDb provider and search sessions against a
//! local fake catalog server bound to an ephemeral port.

#[path = "fake_omdb.rs"]
mod fake_omdb;

#[path = "integration/omdb_provider.rs"]
mod omdb_provider;
#[path = "integration/session_over_http.rs"]
mod session_over_http;
