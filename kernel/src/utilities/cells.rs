// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interior-mutability cells used by drivers that are shared by `&'static`
//! reference.
//!
//! To use `TakeCell`, for example, users should use:
//!
//!     use kernel::utilities::cells::TakeCell;

use core::cell::Cell;

/// `OptionalCell` is a `Cell` that wraps an `Option`. This is helper type
/// that makes keeping types that can be `None` a little cleaner.
pub struct OptionalCell<T: Copy> {
    value: Cell<Option<T>>,
}

impl<T: Copy> OptionalCell<T> {
    /// Create a new OptionalCell.
    pub const fn new(val: T) -> OptionalCell<T> {
        OptionalCell {
            value: Cell::new(Some(val)),
        }
    }

    /// Create an empty `OptionalCell` (contains just `None`).
    pub const fn empty() -> OptionalCell<T> {
        OptionalCell {
            value: Cell::new(None),
        }
    }

    /// Update the stored value.
    pub fn set(&self, val: T) {
        self.value.set(Some(val));
    }

    /// Reset the stored value to `None`.
    pub fn clear(&self) {
        self.value.set(None);
    }

    /// Check if the cell contains something.
    pub fn is_some(&self) -> bool {
        self.value.get().is_some()
    }

    /// Check if the cell is None.
    pub fn is_none(&self) -> bool {
        self.value.get().is_none()
    }

    /// Return the contained value, leaving the cell empty.
    pub fn take(&self) -> Option<T> {
        self.value.take()
    }

    /// Returns a copy of the contained [`Option`].
    pub fn get(&self) -> Option<T> {
        self.value.get()
    }

    /// Call a closure on the value if the value exists.
    pub fn map<F, R>(&self, closure: F) -> Option<R>
    where
        F: FnOnce(T) -> R,
    {
        self.value.get().map(closure)
    }
}

/// A shared reference to a mutable reference.
///
/// A `TakeCell` wraps potential reference to mutable memory that may be
/// available at a given point. Only one referrer has access to the
/// underlying mutable reference at a time: clients either move it out with
/// `take` or borrow it inside a `map` closure.
pub struct TakeCell<'a, T: 'a + ?Sized> {
    val: Cell<Option<&'a mut T>>,
}

impl<'a, T: ?Sized> TakeCell<'a, T> {
    pub const fn empty() -> TakeCell<'a, T> {
        TakeCell {
            val: Cell::new(None),
        }
    }

    /// Creates a new `TakeCell` containing `value`
    pub const fn new(value: &'a mut T) -> TakeCell<'a, T> {
        TakeCell {
            val: Cell::new(Some(value)),
        }
    }

    pub fn is_none(&self) -> bool {
        let inner = self.take();
        let return_val = inner.is_none();
        self.val.set(inner);
        return_val
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Takes the mutable reference out of the `TakeCell` leaving a `None` in
    /// its place.
    pub fn take(&self) -> Option<&'a mut T> {
        self.val.take()
    }

    /// Stores `val` in the `TakeCell`, returning the previous reference if
    /// there was one.
    pub fn replace(&self, val: &'a mut T) -> Option<&'a mut T> {
        let prev = self.take();
        self.val.set(Some(val));
        prev
    }

    /// Allows `closure` to borrow the contents of the `TakeCell` if-and-only-if
    /// it is not `take`n already. The value is put back afterwards.
    pub fn map<F, R>(&self, closure: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let maybe_val = self.take();
        maybe_val.map(|val| {
            let res = closure(val);
            self.replace(val);
            res
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionalCell, TakeCell};

    #[test]
    fn optional_cell_set_take() {
        let cell = OptionalCell::empty();
        assert!(cell.is_none());
        cell.set(3u8);
        assert_eq!(cell.map(|v| v + 1), Some(4));
        assert_eq!(cell.take(), Some(3));
        assert!(cell.is_none());
    }

    #[test]
    fn take_cell_map_puts_value_back() {
        let mut storage = [0u8; 4];
        let cell = TakeCell::new(&mut storage[..]);
        assert_eq!(cell.map(|buf| buf.len()), Some(4));
        assert!(cell.is_some());
        let buf = cell.take();
        assert!(buf.is_some());
        assert!(cell.is_none());
        assert_eq!(cell.map(|buf| buf.len()), None);
    }
}
