//! Shared test utilities for storyboard_board tests.

#![allow(dead_code)]

mod mock_driver;

pub use mock_driver::{MockDriver, MockResponse, image, request_text, test_config};
