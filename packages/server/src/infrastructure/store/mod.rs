pub mod inmemory;

pub use inmemory::InMemoryStateStore;
