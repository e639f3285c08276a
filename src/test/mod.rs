//! Shared test doubles.


pub(crate) use memory::MemoryVault;
