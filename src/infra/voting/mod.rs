// Implementations for the voting service.

pub mod in_memory_item_store;

pub use in_memory_item_store::InMemoryItemStore;
