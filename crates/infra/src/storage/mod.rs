//! Session token stores
//!
//! Both stores keep exactly one value under the key `token`.

pub mod file;
pub mod keychain;

pub use file::FileSessionStore;
pub use keychain::KeychainSessionStore;
