/// Utility module containing various helper functions.
pub mod hash; // Name-based UUID derivation
pub mod time; // Wall clock helpers
