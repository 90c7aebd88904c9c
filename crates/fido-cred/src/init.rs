//! Process-wide library initialization.

use std::sync::OnceLock;

/// Flags accepted by [`init`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitFlags(u32);

impl InitFlags {
    /// No optional behavior.
    pub const NONE: InitFlags = InitFlags(0);
    /// Log rejected parameters at debug level.
    pub const DEBUG: InitFlags = InitFlags(0x01);

    /// Whether every bit in `other` is set.
    pub fn contains(self, other: InitFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

static INIT: OnceLock<InitFlags> = OnceLock::new();

/// Initialize the library. Safe to call any number of times; the flags of the
/// first call win and there is no teardown.
pub fn init(flags: InitFlags) {
    let mut first = false;
    INIT.get_or_init(|| {
        first = true;
        flags
    });
    if first {
        tracing::debug!(flags = flags.0, "fido-cred initialized");
    }
}

/// Whether [`init`] has run.
pub fn is_initialized() -> bool {
    INIT.get().is_some()
}

pub(crate) fn debug_enabled() -> bool {
    INIT.get()
        .is_some_and(|flags| flags.contains(InitFlags::DEBUG))
}
