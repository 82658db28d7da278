// Platform capability resolution for adapter interfaces

/// How a platform-dependent adapter can serve its interface.
///
/// Resolved once at startup rather than probed ad hoc at each call site.
/// Callers gate on this before use: `Unsupported` features either degrade
/// silently (audio take recording) or surface an error (speech recognition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The native implementation is available.
    Supported,
    /// A degraded implementation is available (e.g. a fallback codec).
    Fallback,
    /// The feature is absent on this platform.
    Unsupported,
}

impl Capability {
    /// Whether the adapter can be used at all.
    pub fn is_available(&self) -> bool {
        !matches!(self, Capability::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_counts_as_available() {
        assert!(Capability::Supported.is_available());
        assert!(Capability::Fallback.is_available());
        assert!(!Capability::Unsupported.is_available());
    }
}
