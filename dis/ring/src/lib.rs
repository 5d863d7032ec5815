//! Modular-arithmetic engine for the Dis machine word.
//!
//! Every value the machine touches is an element of Z/(B^N): an integer in
//! `[0, B^N)` for a base `B` and digit count `N` fixed at construction. The
//! engine owns no state; all operations are total and reduce modulo `B^N`,
//! never modulo the native width of the word type.

pub mod ring;
pub mod word;

pub use ring::{ConfigError, Ring};
pub use word::Word;
