#![doc = include_str!("../README.md")]

pub mod examples;
pub mod literal;
pub mod pattern;
pub mod report;
pub mod term;
