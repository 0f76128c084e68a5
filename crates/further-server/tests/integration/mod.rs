pub mod common;
mod bootstrap_tests;
mod exit_code_tests;
