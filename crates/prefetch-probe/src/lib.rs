//! Prefetch probe — core of a test fixture that counts speculative prefetches per key
//! and echoes a per-client cookie counter.

pub mod cookie;
pub mod error;
pub mod probe;
pub mod store;
pub mod types;

pub use cookie::{find_cookie, parse_count, COUNT_COOKIE};
pub use error::{ProbeError, ProbeResult};
pub use probe::{decode_purpose, is_prefetch, PrefetchProbe};
pub use store::{CounterStore, MemoryStash, StashKey};
pub use types::*;
