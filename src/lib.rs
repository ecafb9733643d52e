//! # Prime Probe
//!
//! A resizable hash table mapping string keys to string values.
//!
//! Entries live directly in a slot array whose length is always prime. Collisions are
//! resolved with double hashing: two polynomial string hashes pick the starting slot and the
//! stride of each key's probe sequence. Deletes leave tombstones so that later keys on the same
//! sequence stay reachable.
//!
//! The table grows when an insert finds it more than 70% full and shrinks when a delete finds
//! it less than 10% full, rebuilding the slot array at the nearest prime to the new base size.
//!
//! ## Basic Usage
//!
//! ```rust
//! use prime_probe::HashTable;
//!
//! let mut table = HashTable::new();
//!
//! // Insert values
//! table.insert("apple", "red");
//! table.insert("banana", "yellow");
//!
//! // Retrieve values
//! assert_eq!(table.search("apple"), Some("red"));
//!
//! // Update values
//! assert_eq!(table.insert("apple", "green"), Some("red".to_string()));
//! assert_eq!(table.search("apple"), Some("green"));
//!
//! // Delete values; deleting a missing key is a no-op
//! table.delete("apple");
//! table.delete("cherry");
//! assert_eq!(table.search("apple"), None);
//! assert_eq!(table.len(), 1);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use prime_probe::HashTable;
//!
//! let mut table = HashTable::new();
//! assert_eq!(table.capacity(), 53);
//!
//! for i in 0..100 {
//!     table.insert(format!("key-{i}"), i.to_string());
//! }
//!
//! assert!(table.capacity() > 100);
//! assert_eq!(table.search("key-42"), Some("42"));
//! ```

/// Module implementing the open-addressing hash table
mod hash_table;
/// Prime size selection for slot arrays
pub mod prime;
/// String hashing and double-hashing probe sequences
pub mod probe;

pub use hash_table::{DEFAULT_BASE_SIZE, GROW_LOAD, HashTable, MAX_BASE_SIZE, SHRINK_LOAD};
