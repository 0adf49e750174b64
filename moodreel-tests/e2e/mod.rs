//! End-to-end tests for Moodreel
//!
//! These tests drive the web router the way a browser would, with the real
//! OMDb provider talking to a fake catalog server.

#[path = "../fake_omdb.rs"]
mod fake_omdb;

mod web_workflow;
