//! Adapters for the domain ports: in-memory and RocksDB repositories and the
//! simulated payment gateway.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod simulated_gateway;
