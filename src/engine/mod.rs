// Pure core: data model + execution simulation. No I/O.
pub mod execution;
pub mod types;
