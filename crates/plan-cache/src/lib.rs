//! # Plan Cache
//!
//! 產品規格快取模組
//!
//! 由呼叫方持有的顯式快取物件；核心引擎不做任何內部快取，
//! 也沒有任何全域/靜態狀態。

pub mod dirty_tracking;
pub mod spec_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use spec_cache::SpecCache;
