//! Draw statistics for debugging tessellation and transform cost.
//!
//! Enable draw stats by compiling with the `draw-stats` feature:
//! ```bash
//! cargo run --example transformed_shapes --features draw-stats
//! ```
//!
//! A summary is logged at `info` level about once per second, showing:
//! - Frames ended
//! - Primitives emitted and skipped as degenerate
//! - Vertices and indices written
//! - Vertices rewritten by the transform post-pass

/// Snapshot of accumulated draw statistics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub frames: u64,
    pub primitives_emitted: u64,
    pub primitives_skipped: u64,
    pub vertices_written: u64,
    pub indices_written: u64,
    pub vertices_transformed: u64,
}

#[cfg(feature = "draw-stats")]
mod inner {
    use std::cell::RefCell;
    use std::time::Instant;

    thread_local! {
        static STATS: RefCell<DrawStats> = RefCell::new(DrawStats::new());
    }

    struct DrawStats {
        frames: u64,
        // Emission
        primitives_emitted: u64,
        primitives_skipped: u64,
        vertices_written: u64,
        indices_written: u64,
        // Transform post-pass
        vertices_transformed: u64,
        // Timing
        last_print: Instant,
    }

    impl DrawStats {
        fn new() -> Self {
            Self {
                frames: 0,
                primitives_emitted: 0,
                primitives_skipped: 0,
                vertices_written: 0,
                indices_written: 0,
                vertices_transformed: 0,
                last_print: Instant::now(),
            }
        }

        fn reset(&mut self) {
            *self = Self::new();
        }
    }

    /// Record a primitive that reserved `vertices` and `indices`.
    #[inline]
    pub fn record_primitive(vertices: usize, indices: usize) {
        STATS.with(|s| {
            let mut stats = s.borrow_mut();
            stats.primitives_emitted += 1;
            stats.vertices_written += vertices as u64;
            stats.indices_written += indices as u64;
        });
    }

    /// Record a primitive skipped because its geometry was degenerate.
    #[inline]
    pub fn record_skipped() {
        STATS.with(|s| {
            s.borrow_mut().primitives_skipped += 1;
        });
    }

    /// Record vertices rewritten by the transform post-pass.
    #[inline]
    pub fn record_transformed(vertices: usize) {
        STATS.with(|s| {
            s.borrow_mut().vertices_transformed += vertices as u64;
        });
    }

    /// Return a snapshot of the current stats (for testing).
    pub fn get_stats() -> super::StatsSnapshot {
        STATS.with(|s| {
            let stats = s.borrow();
            super::StatsSnapshot {
                frames: stats.frames,
                primitives_emitted: stats.primitives_emitted,
                primitives_skipped: stats.primitives_skipped,
                vertices_written: stats.vertices_written,
                indices_written: stats.indices_written,
                vertices_transformed: stats.vertices_transformed,
            }
        })
    }

    /// Reset all stats to zero (for test isolation).
    pub fn reset_stats() {
        STATS.with(|s| {
            s.borrow_mut().reset();
        });
    }

    /// Called at the end of each frame to potentially log stats.
    pub fn end_frame() {
        STATS.with(|s| {
            let mut stats = s.borrow_mut();
            stats.frames += 1;

            if stats.last_print.elapsed().as_secs() >= 1 {
                let total = stats.primitives_emitted + stats.primitives_skipped;
                let skip_rate = if total > 0 {
                    (stats.primitives_skipped as f64 / total as f64) * 100.0
                } else {
                    0.0
                };

                log::info!(
                    "[Draw Stats] frames={} primitives={} skipped={} ({:.1}%)",
                    stats.frames,
                    stats.primitives_emitted,
                    stats.primitives_skipped,
                    skip_rate
                );
                log::info!(
                    "  buffer: vertices={} indices={} transformed={}",
                    stats.vertices_written,
                    stats.indices_written,
                    stats.vertices_transformed
                );

                stats.reset();
            }
        });
    }
}

#[cfg(feature = "draw-stats")]
pub use inner::*;

// No-op implementations when feature is disabled - these get completely inlined away

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn get_stats() -> StatsSnapshot {
    StatsSnapshot::default()
}

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn reset_stats() {}

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn record_primitive(_vertices: usize, _indices: usize) {}

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn record_skipped() {}

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn record_transformed(_vertices: usize) {}

#[cfg(not(feature = "draw-stats"))]
#[inline(always)]
pub fn end_frame() {}

#[cfg(test)]
#[cfg(feature = "draw-stats")]
mod tests {
    use super::*;

    /// Reset stats before each test to ensure isolation
    /// (tests share the thread-local when run on the same thread).
    fn setup() {
        reset_stats();
    }

    #[test]
    fn test_primitive_counters() {
        setup();
        record_primitive(4, 6);
        record_primitive(8, 24);
        let s = get_stats();
        assert_eq!(s.primitives_emitted, 2);
        assert_eq!(s.vertices_written, 12);
        assert_eq!(s.indices_written, 30);
        assert_eq!(s.primitives_skipped, 0);
    }

    #[test]
    fn test_skipped_counter() {
        setup();
        record_skipped();
        record_skipped();
        assert_eq!(get_stats().primitives_skipped, 2);
    }

    #[test]
    fn test_transformed_counter() {
        setup();
        record_transformed(4);
        record_transformed(9);
        assert_eq!(get_stats().vertices_transformed, 13);
    }

    #[test]
    fn test_reset_clears_all_counters() {
        setup();
        record_primitive(4, 6);
        record_skipped();
        record_transformed(4);
        end_frame();
        assert_ne!(get_stats(), StatsSnapshot::default());

        reset_stats();
        assert_eq!(get_stats(), StatsSnapshot::default());
    }
}
