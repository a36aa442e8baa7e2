//! Integration test modules.

mod flow;
mod notify;
mod screens;
