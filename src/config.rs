//! Render settings.

/// Slack allowed when deciding whether a plane crossing lies on an edge segment.
pub const DEFAULT_EDGE_EPSILON: f64 = 1e-8;

/// Depth every row starts from; anything nearer than this can be drawn.
pub const DEFAULT_DEPTH_CLEAR: f64 = 1e8;

/// Number of hardware threads, never less than one.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Tunables for an [`Engine`](crate::engine::Engine).
///
/// ```ignore
/// let config = RenderConfig::default().with_workers(1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Worker threads sharing each frame's rows. One means render on the caller's thread.
    pub workers: usize,
    pub edge_epsilon: f64,
    pub depth_clear: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: hardware_concurrency(),
            edge_epsilon: DEFAULT_EDGE_EPSILON,
            depth_clear: DEFAULT_DEPTH_CLEAR,
        }
    }
}

impl RenderConfig {
    /// Sets the worker count; zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_edge_epsilon(mut self, epsilon: f64) -> Self {
        self.edge_epsilon = epsilon;
        self
    }

    pub fn with_depth_clear(mut self, depth: f64) -> Self {
        self.depth_clear = depth;
        self
    }
}
