pub mod hashmap_identity_store;
pub mod in_memory_code_cache;

pub use hashmap_identity_store::HashMapIdentityStore;
pub use in_memory_code_cache::InMemoryCodeCache;
