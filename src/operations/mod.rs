mod angle_traverse;
mod closure;
mod extents;
mod inverse;
mod project;

pub use angle_traverse::{AngleLeg, AngleTraverse, TurnReference};
pub use closure::{Closure, ClosureResult};
pub use extents::{Bounds2, Extents};
pub use inverse::{leg_between, Inverse};
pub use project::{project_courses, Project};
