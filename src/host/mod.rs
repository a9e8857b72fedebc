//! Host-side integration: container abstraction, mount options and the render front object.

/// Container seam and the in-memory HTML implementation.
pub mod container;
/// Mount configuration.
pub mod options;
/// Front object tying a mounted container to sessions.
pub mod renderer;
