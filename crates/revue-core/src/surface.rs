//! Surface identifiers: the reverse-lookup key between host toolkit and engine.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one rendering surface.
///
/// The engine never touches the surface itself, since rendering belongs to
/// the host toolkit. It only needs a stable key to map an interaction event
/// raised on a surface back to the container wrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

impl SurfaceId {
    /// Mints a process-unique surface id.
    ///
    /// Factories call this when instantiating a surface so no two live
    /// containers ever share a reverse-lookup key.
    pub fn next() -> Self {
        SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
