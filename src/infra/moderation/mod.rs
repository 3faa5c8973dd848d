// Implementations for the moderation gate.

pub mod in_memory_ban_store;

pub use in_memory_ban_store::InMemoryBanStore;
