/// Freshness of a cached value.
///
/// `Init` has never been loaded, `Pending` has a load in flight, `Dirty` was
/// invalidated and must be reloaded on next read, `Clean` is usable as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Init,
    Pending,
    Dirty,
    Clean,
}

impl SyncStatus {
    /// Whether a read should trigger a reload.
    pub fn needs_load(self) -> bool {
        matches!(self, Self::Init | Self::Dirty)
    }

    pub fn is_clean(self) -> bool {
        self == Self::Clean
    }
}
