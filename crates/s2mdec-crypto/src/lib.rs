//! Content hashing for StarCraft II map depot objects
//!
//! Depot objects (`.s2mh` map headers, `.s2ml` map lists, `.s2ma` archives)
//! are addressed by the SHA-256 of their bytes. This crate provides the
//! [`ContentHash`] type used everywhere such an address appears, plus a
//! helper for checking that an object name agrees with its contents.
//!
//! # Examples
//!
//! ```
//! use s2mdec_crypto::ContentHash;
//!
//! let data = b"Hello, World!";
//! let hash = ContentHash::from_data(data);
//! println!("Content hash: {}", hash);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod hash;

pub use error::CryptoError;
pub use hash::{ContentHash, HASH_LEN, verify_object_name};
