// This module defines traits (ports) that the domain logic expects
// to be implemented by outer layers (e.g., application or infrastructure).

pub mod key_value_store;
pub use key_value_store::KeyValueStore;
