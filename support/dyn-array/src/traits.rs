use crate::Error;

/// The operations shared by every array backing.
///
/// Indices are logical: `0..len()` is always the set of valid positions,
/// whatever the storage looks like underneath.
pub trait ArrayOps<T> {
    fn len(&self) -> usize;

    /// Returns the value at `index`.
    fn get(&self, index: usize) -> Result<&T, Error>;

    /// Appends `value` and returns the new length.
    fn push(&mut self, value: T) -> usize;

    /// Removes and returns the last value.
    fn pop(&mut self) -> Result<T, Error>;

    /// Removes the value at `index`, shifting everything after it one slot
    /// to the left. Returns the removed value.
    fn delete(&mut self, index: usize) -> Result<T, Error>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
