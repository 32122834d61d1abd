//! Cache domain - expiring-map abstraction and key derivation

mod key;
mod repository;

pub use key::{CacheKeyParams, RecipeKeyDeriver, DEFAULT_KEY_NAMESPACE};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
