//! chain-hashtable: a string-keyed hash table with separate chaining,
//! pluggable string hashing and explicit, caller-driven resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose every moving part is visible: the hash
//!   function, the bucket index, the collision chain and the resize.
//! - Layers:
//!   - `hash`: FNV-1 (64-bit) and DJB2 (32-bit) as pure functions, plus the
//!     `StringHasher` trait that selects one of them per table.
//!   - `chain`: singly linked chains whose nodes live in a generational
//!     arena (`slotmap`). A bucket stores its head key; a node stores its
//!     successor key.
//!   - `HashTable<V, H>`: owns the bucket array and the arena, tracks size
//!     and capacity, exposes put/get/delete/resize and enumeration.
//!
//! Constraints
//! - Single-threaded and synchronous; mutation requires `&mut self`.
//! - `capacity >= MIN_CAPACITY` at construction. `size` is tracked
//!   incrementally and always equals the number of nodes in the arena.
//! - Every node reachable from bucket `i` satisfies `hash_index(key) == i`
//!   under the current capacity, except while `resize` is running.
//! - Keys are unique table-wide; new keys are appended at the chain tail.
//!
//! Absence policies
//! - Lenient: `get`, `get_mut`, `delete` return `Option`. A lenient delete
//!   of a missing key also logs a warning through `log`.
//! - Strict: `get_or_fail`, `delete_or_fail` return
//!   `Err(HashTableError::KeyNotFound)`; `table["key"]` panics with the same
//!   message.
//!
//! Resizing
//! - Never automatic. `resize(n)` swaps in a fresh bucket array and arena,
//!   then re-puts every old entry in bucket order, chain order.
//! - Whether `n` may drop below `MIN_CAPACITY` is a per-table
//!   `ResizePolicy`; the default (`Relaxed`) allows it. Zero is always
//!   rejected.
//!
//! Enumeration order
//! - `iter`/`keys`/`values`/`items` walk buckets by index, then each chain
//!   head to tail. This is not global insertion order.
//!
//! Non-goals
//! - No concurrent access, no persistence, no non-string keys.

mod chain;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;

// Public surface
pub use error::HashTableError;
pub use hash::{djb2, fnv1, Djb2, Fnv1, StringHasher, MIN_CAPACITY};
pub use hash_table::{HashTable, Iter, Keys, ResizePolicy, Values};
