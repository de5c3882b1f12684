use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted resource container with read-write locking.
///
/// `MtResource` shares a value between the main thread and the worker threads of the
/// task manager. Meshing tasks hold read guards on the world while they run; edits
/// and task results take the write guard on the main thread.
///
/// # Type Parameters
/// - `T`: The type of the contained resource, must be `Send + Sync`
///
/// # Examples
///
/// ```
/// use voxel_world::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let shared = counter.clone();
///
/// std::thread::spawn(move || *shared.get_mut() += 1).join().unwrap();
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Poisoning
/// A thread that panics while holding a guard poisons the lock. Every later access
/// through any handle panics as well.
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync> MtResource<T> {
    /// Wraps `resource` for sharing.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a guard that allows reading the contained value.
    ///
    /// Blocks while a write guard is held.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().expect("MtResource lock poisoned")
    }

    /// Returns a guard that allows modifying the contained value.
    ///
    /// Blocks while any other guard is held.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().expect("MtResource lock poisoned")
    }

    /// The number of handles sharing this resource.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }

    /// Takes the value back out if this is the last handle.
    ///
    /// # Returns
    /// `Err(self)` while other handles (for example in-flight tasks) still exist.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn try_into_inner(self) -> Result<T, Self> {
        match Arc::try_unwrap(self.resource) {
            Ok(lock) => Ok(lock.into_inner().expect("MtResource lock poisoned")),
            Err(resource) => Err(Self { resource }),
        }
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}
