//! Unit tests for `indigo_protocol`.

mod command_tests;
mod tlv_tests;
