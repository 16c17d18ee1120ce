//! Rule compilation for the deglyph engine.
//!
//! Turns the declarative rule set from `config` into the regexes and literal
//! tables the engine applies, caching the result per rule set.

pub mod compiler;
