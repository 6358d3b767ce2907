//! Test Module
//!
//! Cross-module test suite for the Verbot core.
//!
//! ## Test Categories
//! - `brain_tests`: classification, generators and knowledge base end to end
//! - `supervisor_tests`: conversation shell turn-taking and transcript guarantees
//! - `config_tests`: environment parsing and token file loading

pub mod supervisor_tests;
