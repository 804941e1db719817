use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitError {
    /// Merge operands differ in (primary, detector id)
    #[error("cannot merge hit of primary {} in cell {} into hit of primary {} in cell {}", .found.0, .found.1, .expected.0, .expected.1)]
    IdentityMismatch {
        expected: (i32, i32),
        found: (i32, i32),
    },
}
