use core::fmt;

use hashbrown::HashMap;

use crate::{ArrayOps, Error};

/// An array stored in a hash map keyed by index.
///
/// The keys are always exactly `0..len`. A lookup that misses is the same as
/// an out-of-range index. Deleting shifts every later value down one key, one
/// remove-and-insert at a time, in ascending order.
///
/// Every operation is O(1) except `delete`, which costs O(len - index).
#[derive(Clone)]
pub struct MapArray<T> {
    length: usize,
    data: HashMap<usize, T>,
}

impl<T> MapArray<T> {
    pub fn new() -> Self {
        Self {
            length: 0,
            data: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, index: usize) -> Result<&T, Error> {
        self.data.get(&index).ok_or_else(|| self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let length = self.length;
        match self.data.get_mut(&index) {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(index, len = length, "index out of range");
                Err(Error::IndexOutOfRange { index, len: length })
            }
        }
    }

    pub fn push(&mut self, value: T) -> usize {
        self.data.insert(self.length, value);
        self.length += 1;
        self.length
    }

    pub fn pop(&mut self) -> Result<T, Error> {
        let Some(last) = self.length.checked_sub(1) else {
            tracing::debug!("pop on empty array");
            return Err(Error::EmptyCollection);
        };
        let value = self.data.remove(&last).ok_or(Error::EmptyCollection)?;
        self.length = last;
        Ok(value)
    }

    /// Removes the value at `index` and moves each later value down one key.
    pub fn delete(&mut self, index: usize) -> Result<T, Error> {
        let removed = match self.data.remove(&index) {
            Some(value) => value,
            None => return Err(self.out_of_range(index)),
        };
        tracing::trace!(index, shifted = self.length - index - 1, "shift-deleting element");

        for i in index..self.length - 1 {
            if let Some(next) = self.data.remove(&(i + 1)) {
                self.data.insert(i, next);
            }
        }
        self.length -= 1;
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.length = 0;
    }

    /// Iterates values in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.length).filter_map(move |i| self.data.get(&i))
    }

    fn out_of_range(&self, index: usize) -> Error {
        tracing::debug!(index, len = self.length, "index out of range");
        Error::IndexOutOfRange {
            index,
            len: self.length,
        }
    }
}

impl<T> Default for MapArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MapArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for MapArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for MapArray<T> {}

impl<T> Extend<T> for MapArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for MapArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> ArrayOps<T> for MapArray<T> {
    fn len(&self) -> usize {
        MapArray::len(self)
    }

    fn get(&self, index: usize) -> Result<&T, Error> {
        MapArray::get(self, index)
    }

    fn push(&mut self, value: T) -> usize {
        MapArray::push(self, value)
    }

    fn pop(&mut self) -> Result<T, Error> {
        MapArray::pop(self)
    }

    fn delete(&mut self, index: usize) -> Result<T, Error> {
        MapArray::delete(self, index)
    }
}
