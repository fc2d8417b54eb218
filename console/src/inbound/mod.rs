//! Inbound adapters that translate user input into controller calls while
//! keeping presentation details at the edge.

pub mod console;
