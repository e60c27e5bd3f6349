/// Convenience alias for results produced by the strict accessors.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the table.
///
/// Absence is normally reported through `Option`; only the strict accessors
/// ([`HashMap::at`] and [`HashMap::at_mut`]) return [`Error::KeyNotFound`].
/// [`Error::ProbeExhausted`] is never returned, it is the message of the panic
/// raised when the index has been scanned end to end without finding a free
/// or matching slot.
///
/// [`HashMap::at`]: crate::HashMap::at
/// [`HashMap::at_mut`]: crate::HashMap::at_mut
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested key is not present.
    #[error("key not found")]
    KeyNotFound,

    /// Every slot of the index was scanned without reaching a free or
    /// matching slot. Indicates an inconsistent hash/equality pair or a
    /// broken growth trigger.
    #[error("probe exhausted all {index_capacity} index slots")]
    ProbeExhausted {
        /// Number of slots in the index at the time of the failure.
        index_capacity: usize,
    },
}

/// Aborts the current operation after an exhausted probe.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn probe_exhausted(index_capacity: usize) -> ! {
    panic!("{}", Error::ProbeExhausted { index_capacity })
}
