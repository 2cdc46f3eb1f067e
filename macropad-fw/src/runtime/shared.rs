pub(crate) mod tick;
#[cfg(any(feature = "serial", feature = "hiddev"))]
pub(crate) mod usb;

pub struct SyncUnsafe<T>(core::cell::UnsafeCell<T>);

unsafe impl<T> Sync for SyncUnsafe<T> where T: Sync {}

/// One-shot initialized static storage handed out as a mutable reference.
pub struct SyncUnsafeOnce<T>(core::cell::OnceCell<SyncUnsafe<T>>);

unsafe impl<T> Sync for SyncUnsafeOnce<T> where T: Sync {}

impl<T> SyncUnsafeOnce<T> {
    pub const fn new() -> Self {
        Self(core::cell::OnceCell::new())
    }

    pub fn set(&self, val: T) {
        let _ = self.0.set(SyncUnsafe(core::cell::UnsafeCell::new(val)));
    }

    /// # Safety
    /// Only a single reference to this is held
    #[inline]
    pub unsafe fn as_mut<'a>(&'static self) -> Option<&'a mut T> {
        self.0.get().and_then(|r| r.0.get().as_mut())
    }
}
