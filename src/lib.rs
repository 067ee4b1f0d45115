pub mod angle;
pub mod error;
pub mod math;
pub mod operations;
pub mod session;
pub mod traverse;
pub mod units;

pub use angle::{Angle, AngleConvention, AngleReferenceDirection, AngleRotationDirection};
pub use error::{ErrorKind, Result, TraverseError};
pub use math::Point2;
pub use session::{SessionConfig, TraverseSession};
pub use traverse::{LegId, TraverseLeg, TraverseLegs};
