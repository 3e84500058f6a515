//! Data structures that assume a single owner.
//! 
//! Nothing in here is `Sync`-aware: mutation goes through `&mut self`, and callers that want to share
//! one across threads have to wrap it in a lock themselves.

pub mod rbtree;
