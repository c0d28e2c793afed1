//! A fair async reader/writer lock.
//!
//! Multiple readers may hold the lock concurrently; a writer requires
//! exclusive access. Thin wrapper around `tokio::sync::RwLock`, which is
//! write-preferring: once a writer is queued, later readers queue behind it
//! too, so a steady stream of new readers cannot starve a writer that
//! arrived while reads were in flight.

use std::ops::Deref;
use std::ops::DerefMut;

use tokio::sync::RwLock;
use tokio::sync::RwLockReadGuard;
use tokio::sync::RwLockWriteGuard;

pub struct AsyncRwLock<T> {
    inner: RwLock<T>,
}

impl<T> AsyncRwLock<T> {
    pub fn new(data: T) -> Self {
        Self { inner: RwLock::new(data) }
    }

    /// Acquires a shared read guard, waiting while a writer holds the lock
    /// or one is already queued ahead of this call.
    pub async fn read(&self) -> ReadGuard<'_, T> {
        ReadGuard(self.inner.read().await)
    }

    /// Acquires an exclusive write guard, waiting while any reader or
    /// writer holds the lock.
    pub async fn write(&self) -> WriteGuard<'_, T> {
        WriteGuard(self.inner.write().await)
    }
}

pub struct ReadGuard<'a, T>(RwLockReadGuard<'a, T>);

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub struct WriteGuard<'a, T>(RwLockWriteGuard<'a, T>);

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[cfg(test)]
#[path = "lock.test.rs"]
mod tests;
