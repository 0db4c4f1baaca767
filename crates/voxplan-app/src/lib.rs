//! Host side of the voxel build planner: platform directories, the redraw
//! throttle and the [`Planner`] that keeps meshes in step with edits.

pub mod error;
pub mod planner;
pub mod platform;
pub mod throttle;

pub use error::AppError;
pub use planner::{Planner, PlannerStats, session_settings};
pub use platform::{APP_NAME, PlatformDirs, PlatformError};
pub use throttle::{DEFAULT_REDRAW_INTERVAL, RedrawThrottle};
