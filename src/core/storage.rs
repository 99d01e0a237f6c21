use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Append-only storage for bodies.
///
/// Bodies live for the lifetime of the world, so handles are dense indices and
/// iteration always follows registration order.
#[derive(Debug, Clone)]
pub struct BodyStorage<T> {
    items: Vec<T>,
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BodyStorage<T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> BodyHandle {
        let handle = BodyHandle(self.items.len() as u32);
        self.items.push(item);
        handle
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(handle.index())
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(handle.index())
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all items with their handles
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (BodyHandle(i as u32), item))
    }

    /// Iterates mutably over all items with their handles
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut T)> + '_ {
        self.items.iter_mut().enumerate().map(|(i, item)| (BodyHandle(i as u32), item))
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Borrows two distinct bodies mutably at once, in argument order
    pub fn get_pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Result<(&mut T, &mut T)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib {
            return Err(PhysicsError::InvalidParameter(format!(
                "Cannot borrow body {:?} twice",
                a
            )));
        }
        if ia.max(ib) >= self.items.len() {
            let missing = if ia >= self.items.len() { a } else { b };
            return Err(PhysicsError::ResourceNotFound(format!(
                "Body with handle {:?} not found",
                missing
            )));
        }

        if ia < ib {
            let (head, tail) = self.items.split_at_mut(ib);
            Ok((&mut head[ia], &mut tail[0]))
        } else {
            let (head, tail) = self.items.split_at_mut(ia);
            Ok((&mut tail[0], &mut head[ib]))
        }
    }
}
