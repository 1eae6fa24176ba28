//! Bloom filters over integer element ids: a bit filter, a counting filter
//! that supports removal, and a coded bank that tells apart several sets
//! with a handful of shared filters.
//!
//! All variants hash through the same salted digit-folding [`HashScheme`].
//!
//! ```
//! use coded_bloom::{BitFilter, CodedFilterBank, Filter, FilterConfig, SaltSet};
//!
//! let mut filter: BitFilter = FilterConfig::new(1000, 3).with_seed(7).build().unwrap();
//! filter.add(42).unwrap();
//! assert!(filter.probably_contains(42));
//!
//! let salts = SaltSet::new(vec![0]).unwrap();
//! let mut bank: CodedFilterBank = CodedFilterBank::new(5, 100, salts).unwrap();
//! bank.encode_set(42, 5).unwrap();
//! assert_eq!(bank.decode(42).to_string(), "101");
//! ```

pub mod bloom_filters;
pub mod code;
pub mod coded;
pub mod config;
pub mod error;
pub mod hash;
pub mod shared;

pub use bloom_filters::{BitFilter, CountingFilter, Filter, RemovableFilter};
pub use code::{assign_codes, code_length, CodeBook, SetCode};
pub use coded::CodedFilterBank;
pub use config::{CodedConfig, FilterConfig};
pub use error::{Error, Result};
pub use hash::{derive_indices, element_id, fold, HashScheme, SaltSet};
pub use shared::SharedFilter;
