//! Resolution-based saturation engines (spec.md §4.3, §4.4).
pub mod naive;
pub mod optimized;

pub use naive::NaiveResolutionConfig;
pub use optimized::OptimizedResolutionConfig;
