#![allow(unsafe_code)]

//! Dynamic arrays with explicit shift-on-delete semantics.
//!
//! Two backings implement the same [`ArrayOps`] contract:
//!
//! - [`DynamicArray`]: a contiguous heap buffer that doubles when full.
//! - [`MapArray`]: a hash map keyed by index, the textbook construction.
//!
//! Both keep the valid indices at exactly `0..len()`. `push` and `pop` work at
//! the tail in O(1). `delete` removes from anywhere and pays O(len - index) to
//! move the later elements down.
//!
//! # Example
//!
//! ```
//! use bigo_dyn_array::{DynamicArray, Error};
//!
//! let mut array = DynamicArray::new();
//! for word in ["hi", "hello", "there", "!"] {
//!     array.push(word);
//! }
//!
//! assert_eq!(array.pop(), Ok("!"));
//! assert_eq!(array.delete(1), Ok("hello"));
//! assert_eq!(array.as_slice(), &["hi", "there"]);
//!
//! array.clear();
//! assert_eq!(array.pop(), Err(Error::EmptyCollection));
//! ```

#![no_std]

extern crate alloc;

mod buffer;
mod error;
mod map;
mod traits;

pub use buffer::DynamicArray;
pub use error::Error;
pub use map::MapArray;
pub use traits::ArrayOps;
