use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::{
    fmt,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
    slice,
};

use crate::{ArrayOps, Error};

/// Smallest non-zero capacity the buffer grows to.
const MIN_NON_ZERO_CAP: usize = 4;

/// A growable array over a single contiguous heap buffer.
///
/// Slots `0..len` are initialized, slots `len..cap` are not. Capacity doubles
/// whenever a push finds the buffer full, so `push` is amortized O(1), while
/// `delete` moves every element after the removed one and costs O(len - index).
///
/// ```
/// use bigo_dyn_array::{DynamicArray, Error};
///
/// let mut array = DynamicArray::new();
/// array.push("hi");
/// array.push("hello");
/// array.push("there");
///
/// assert_eq!(array.delete(1), Ok("hello"));
/// assert_eq!(array.as_slice(), &["hi", "there"]);
/// assert_eq!(array.get(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
/// ```
pub struct DynamicArray<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(DynamicArray<u8>, [usize; 3]);

// SAFETY: the buffer is uniquely owned, so thread-safety follows `T`.
unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

impl<T> DynamicArray<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty array with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut array = Self::new();
        if capacity > array.cap {
            array.grow(capacity);
        }
        array
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the buffer holds before it has to grow.
    /// Zero-sized element types report `usize::MAX`.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn get(&self, index: usize) -> Result<&T, Error> {
        Error::check_index(index, self.len)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        Error::check_index(index, self.len)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
    }

    /// Appends `value` at index `len` and returns the new length.
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.cap {
            self.reserve_one_unchecked();
        }
        // SAFETY: len < cap after the reserve above.
        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.len), value);
        }
        self.len += 1;
        self.len
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Result<T, Error> {
        if self.len == 0 {
            tracing::debug!("pop on empty array");
            return Err(Error::EmptyCollection);
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` is initialized and no longer
        // counted as live, so it is read exactly once.
        Ok(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Removes the element at `index` and shifts the tail one slot left.
    ///
    /// Returns the element that was at `index` before the shift. Fails
    /// without modifying the array when `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<T, Error> {
        Error::check_index(index, self.len)?;
        let shifted = self.len - index - 1;
        tracing::trace!(index, shifted, "shift-deleting element");
        // SAFETY: index < len. The removed value is moved out first, then
        // `ptr::copy` moves `index + 1..len` down by one with memmove
        // semantics, so every source slot is read before it is overwritten.
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let removed = ptr::read(slot);
            ptr::copy(slot.add(1), slot, shifted);
            self.len -= 1;
            Ok(removed)
        }
    }

    /// Drops every element. Keeps the allocation.
    pub fn clear(&mut self) {
        let live = self.as_mut_slice() as *mut [T];
        // Set len first: a panicking destructor leaks the rest instead of
        // double-dropping on unwind.
        self.len = 0;
        // SAFETY: `live` covered exactly the initialized slots.
        unsafe { ptr::drop_in_place(live) }
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is non-null and aligned (dangling when empty), and
        // `0..len` is initialized.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: same as `as_slice`, plus `&mut self` is exclusive.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[cold]
    fn reserve_one_unchecked(&mut self) {
        debug_assert_eq!(self.len, self.cap);
        let new_cap = self
            .cap
            .checked_mul(2)
            .expect("capacity overflow")
            .max(MIN_NON_ZERO_CAP);
        self.grow(new_cap);
    }

    /// Moves the live elements into a fresh allocation of `new_cap` slots.
    fn grow(&mut self, new_cap: usize) {
        assert!(!Self::IS_ZST, "capacity overflow");
        debug_assert!(new_cap > self.cap);

        let new_layout = Layout::array::<T>(new_cap).expect("capacity overflow");
        tracing::trace!(old_cap = self.cap, new_cap, "growing array buffer");

        // SAFETY: T is not zero-sized and new_cap > 0, so the layout is non-empty.
        let raw = unsafe { alloc(new_layout) }.cast::<T>();
        let Some(new_ptr) = NonNull::new(raw) else {
            handle_alloc_error(new_layout)
        };

        if self.cap > 0 {
            // SAFETY: the allocations are distinct and the old one holds
            // `len` initialized elements. The old layout was valid when it
            // was allocated.
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                dealloc(self.ptr.as_ptr().cast(), self.current_layout());
            }
        }

        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// # Safety
    ///
    /// The buffer must be allocated (`cap > 0` and `T` not zero-sized).
    unsafe fn current_layout(&self) -> Layout {
        // SAFETY: `Layout::array::<T>(cap)` succeeded when the buffer was
        // allocated, so size and alignment are valid.
        unsafe {
            Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>())
        }
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
        if !Self::IS_ZST && self.cap > 0 {
            // SAFETY: the buffer is allocated and all elements were dropped above.
            unsafe { dealloc(self.ptr.as_ptr().cast(), self.current_layout()) }
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut cloned = Self::with_capacity(self.len);
        for value in self.iter() {
            cloned.push(value.clone());
        }
        cloned
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> ArrayOps<T> for DynamicArray<T> {
    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        DynamicArray::get(self, index)
    }

    fn push(&mut self, value: T) -> usize {
        DynamicArray::push(self, value)
    }

    fn pop(&mut self) -> Result<T, Error> {
        DynamicArray::pop(self)
    }

    fn delete(&mut self, index: usize) -> Result<T, Error> {
        DynamicArray::delete(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, rc::Rc, string::String, vec::Vec};
    use core::cell::Cell;

    static_assertions::assert_impl_all!(DynamicArray<u8>: Send, Sync);
    static_assertions::assert_not_impl_any!(DynamicArray<Rc<u8>>: Send, Sync);

    /// Increments a shared counter when dropped.
    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_new_does_not_allocate() {
        let array = DynamicArray::<u64>::new();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 0);
        assert!(array.is_empty());
    }

    #[test]
    fn test_grow_doubles() {
        let mut array = DynamicArray::new();
        array.push(0u32);
        assert_eq!(array.capacity(), 4);
        for i in 1..4 {
            array.push(i);
        }
        assert_eq!(array.capacity(), 4);

        array.push(4);
        assert_eq!(array.capacity(), 8);
        for i in 5..9 {
            array.push(i);
        }
        assert_eq!(array.capacity(), 16);
        assert_eq!(array.as_slice(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_with_capacity() {
        let mut array = DynamicArray::with_capacity(10);
        assert_eq!(array.capacity(), 10);
        for i in 0..10 {
            array.push(i);
        }
        assert_eq!(array.capacity(), 10);
        array.push(10);
        assert_eq!(array.capacity(), 20);
    }

    #[test]
    fn test_push_returns_new_len() {
        let mut array = DynamicArray::new();
        assert_eq!(array.push('a'), 1);
        assert_eq!(array.push('b'), 2);
        assert_eq!(array.push('c'), 3);
    }

    #[test]
    fn test_get_mut() {
        let mut array: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        *array.get_mut(1).unwrap() *= 10;
        assert_eq!(array.as_slice(), &[1, 20, 3]);
        assert_eq!(
            array.get_mut(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_delete_last_shifts_nothing() {
        let mut array: DynamicArray<i32> = (0..5).collect();
        assert_eq!(array.delete(4), Ok(4));
        assert_eq!(array.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_failed_delete_leaves_array_untouched() {
        let mut array: DynamicArray<i32> = (0..3).collect();
        assert_eq!(
            array.delete(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(array.as_slice(), &[0, 1, 2]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn test_drops_each_element_once() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynamicArray::new();
        for _ in 0..10 {
            array.push(DropCounter(drops.clone()));
        }

        drop(array.pop().unwrap());
        assert_eq!(drops.get(), 1);
        drop(array.delete(0).unwrap());
        assert_eq!(drops.get(), 2);

        drop(array);
        assert_eq!(drops.get(), 10);
    }

    #[test]
    fn test_clear_drops_and_keeps_capacity() {
        let drops = Rc::new(Cell::new(0));
        let mut array = DynamicArray::new();
        for _ in 0..5 {
            array.push(DropCounter(drops.clone()));
        }
        array.clear();
        assert_eq!(drops.get(), 5);
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn test_zero_sized_elements() {
        let mut array = DynamicArray::new();
        assert_eq!(array.capacity(), usize::MAX);
        for _ in 0..100 {
            array.push(());
        }
        assert_eq!(array.len(), 100);
        assert_eq!(array.delete(50), Ok(()));
        assert_eq!(array.pop(), Ok(()));
        assert_eq!(array.len(), 98);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut array: DynamicArray<String> = ["a", "b"].into_iter().map(String::from).collect();
        let cloned = array.clone();
        array.get_mut(0).unwrap().push('!');
        assert_eq!(array.as_slice(), &["a!", "b"]);
        assert_eq!(cloned.as_slice(), &["a", "b"]);
        assert_ne!(array, cloned);
    }

    #[test]
    fn test_debug_prints_as_list() {
        let array: DynamicArray<&str> = ["hi", "there"].into_iter().collect();
        assert_eq!(format!("{:?}", array), r#"["hi", "there"]"#);
        assert_eq!(format!("{:?}", DynamicArray::<u8>::new()), "[]");
    }

    #[test]
    fn test_iter_by_reference() {
        let array: DynamicArray<i32> = (1..=4).collect();
        let mut sum = 0;
        for value in &array {
            sum += value;
        }
        assert_eq!(sum, 10);
    }
}
