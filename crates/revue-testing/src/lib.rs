//! Headless harness and probes for testing revue adapters and shells.
//!
//! Nothing here needs a window system. [`ListHarness`] plays the recycler
//! role against a live adapter so tests can assert on bind counts, pool
//! reuse, and interaction routing; [`ProbeFactory`] and [`RecordingListener`]
//! capture what the engine did; [`TestContentHost`] does the same for the
//! shell's screen lifecycle.

pub mod harness;
pub mod probes;

pub use harness::{ChangeLog, HarnessStats, ListHarness, PumpStats, SlotPoolSpec};
pub use probes::{BindRecord, ProbeContent, ProbeFactory, RecordingListener, TestContentHost};
