use thiserror::Error;

/// Top-level error type for traverse computations and edit sessions.
#[derive(Debug, Error)]
pub enum TraverseError {
    #[error(transparent)]
    Angle(#[from] AngleError),

    #[error(transparent)]
    Leg(#[from] LegError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl TraverseError {
    /// Returns the broad category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Angle(AngleError::NonFinite { .. })
            | Self::Leg(LegError::NegativeDistance { .. } | LegError::NonFiniteDistance { .. })
            | Self::Session(
                SessionError::NothingToDraw | SessionError::NonFiniteCoordinate { .. },
            ) => ErrorKind::InvalidArgument,
            Self::Angle(AngleError::Format { .. }) => ErrorKind::Format,
            Self::Leg(LegError::IndexOutOfRange { .. }) => ErrorKind::OutOfRange,
            Self::Session(SessionError::Persist(_)) => ErrorKind::PersistFailure,
        }
    }
}

/// Coarse error categories a host can branch on without matching every variant.
///
/// All of them are recoverable; the state that existed before the failed call is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed numeric input such as a negative distance or a NaN angle.
    InvalidArgument,
    /// Unparsable bearing text.
    Format,
    /// Index-based operation outside the current collection bounds.
    OutOfRange,
    /// The geometry persister rejected a commit.
    PersistFailure,
}

/// Errors related to angle construction and bearing text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AngleError {
    #[error("angle value {value} is not finite")]
    NonFinite { value: f64 },

    #[error("malformed bearing {input:?}: {reason}")]
    Format { input: String, reason: &'static str },
}

/// Errors related to editing the leg collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LegError {
    #[error("leg index {index} is out of range for {len} legs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("distance {value} is negative")]
    NegativeDistance { value: f64 },

    #[error("distance {value} is not finite")]
    NonFiniteDistance { value: f64 },
}

/// Errors raised by an edit session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("traverse has no legs to draw")]
    NothingToDraw,

    /// A base point, or a point projected from the legs, is NaN or infinite.
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error(transparent)]
    Persist(#[from] CommitRejected),
}

/// Reason given by a geometry persister for refusing a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("commit rejected: {0}")]
pub struct CommitRejected(pub String);

/// Convenience type alias for results using [`TraverseError`].
pub type Result<T> = std::result::Result<T, TraverseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let negative: TraverseError = LegError::NegativeDistance { value: -5.0 }.into();
        assert_eq!(negative.kind(), ErrorKind::InvalidArgument);

        let range: TraverseError = LegError::IndexOutOfRange { index: 3, len: 1 }.into();
        assert_eq!(range.kind(), ErrorKind::OutOfRange);

        let format: TraverseError = AngleError::Format {
            input: "X12Y".into(),
            reason: "missing north/south prefix",
        }
        .into();
        assert_eq!(format.kind(), ErrorKind::Format);

        let persist: TraverseError =
            SessionError::from(CommitRejected("transaction aborted".into())).into();
        assert_eq!(persist.kind(), ErrorKind::PersistFailure);

        let overflow: TraverseError = SessionError::NonFiniteCoordinate {
            x: f64::INFINITY,
            y: 0.0,
        }
        .into();
        assert_eq!(overflow.kind(), ErrorKind::InvalidArgument);
        assert_eq!(overflow.to_string(), "coordinate (inf, 0) is not finite");
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = LegError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "leg index 4 is out of range for 2 legs");
        let err = CommitRejected("locked layer".into());
        assert_eq!(err.to_string(), "commit rejected: locked layer");
    }
}
