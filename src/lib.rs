//! bigo - arrays that make their costs visible
//!
//! # Overview
//!
//! This crate exposes a small dynamic array whose operations have clearly
//! different costs:
//!
//! - `push` / `pop` at the tail: amortized O(1)
//! - `get` by index: O(1)
//! - `delete` at an arbitrary index: O(len - index), every later element
//!   moves one slot to the left
//!
//! Two backings share the [`ArrayOps`] interface. [`DynamicArray`] is a
//! contiguous buffer that doubles when full. [`MapArray`] stores values in a
//! hash map keyed by index.
//!
//! # Quick Start
//!
//! ```
//! use bigo::{DynamicArray, Error};
//!
//! let mut array = DynamicArray::new();
//! array.push("hi");
//! array.push("hello");
//! array.push("there");
//! array.push("!");
//!
//! assert_eq!(array.pop(), Ok("!"));
//! assert_eq!(array.delete(1), Ok("hello"));
//! assert_eq!(format!("{:?}", array), r#"["hi", "there"]"#);
//!
//! assert_eq!(array.get(5), Err(Error::IndexOutOfRange { index: 5, len: 2 }));
//! ```
//!
//! # Errors
//!
//! Failing operations return [`Error`] and leave the array untouched:
//!
//! - [`Error::IndexOutOfRange`] from `get` and `delete` when `index >= len`
//! - [`Error::EmptyCollection`] from `pop` on an empty array
//!
//! # Logging
//!
//! Buffer growth and shift-deletes are emitted as `tracing` events at the
//! `trace` level, and rejected operations at `debug`. Release builds compile
//! out everything below `warn`.

pub use bigo_dyn_array::{ArrayOps, DynamicArray, Error, MapArray};
