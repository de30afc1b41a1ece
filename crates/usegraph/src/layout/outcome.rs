//! Tagged phase results.
//!
//! Layout phases never fail. When a solver call cannot produce a layout the
//! phase substitutes a deterministic fallback and returns it as
//! [`Outcome::Degraded`], carrying the reason next to the value. The
//! pipeline turns every degraded outcome into a [`Degradation`] record.

use std::fmt;

use usegraph_core::identifier::Id;

use super::solver::SolverError;

/// The result of one scoped layout computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The solver produced the value.
    Ok(T),
    /// The value comes from the fallback placement.
    Degraded { value: T, reason: SolverError },
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&SolverError> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

/// Pipeline state reached after each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Built,
    IntraLaidOut,
    Packed,
    InterLaidOut,
    Bounded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Built => "built",
            Phase::IntraLaidOut => "intra-laid-out",
            Phase::Packed => "packed",
            Phase::InterLaidOut => "inter-laid-out",
            Phase::Bounded => "bounded",
        };
        write!(f, "{name}")
    }
}

/// A scope that was laid out with fallback geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradation {
    /// The phase that degraded.
    phase: Phase,
    /// The container segment id, or `subgraphs` for the top-level pass.
    scope: Id,
    reason: SolverError,
}

impl Degradation {
    pub fn new(phase: Phase, scope: Id, reason: SolverError) -> Self {
        Self {
            phase,
            scope,
            reason,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scope(&self) -> Id {
        self.scope
    }

    pub fn reason(&self) -> &SolverError {
        &self.reason
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} phase fell back for `{}`: {}",
            self.phase, self.scope, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let ok = Outcome::Ok(3);
        assert_eq!(*ok.value(), 3);
        assert!(!ok.is_degraded());
        assert_eq!(ok.reason(), None);

        let degraded = Outcome::Degraded {
            value: 4,
            reason: SolverError::EmptyResult,
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.reason(), Some(&SolverError::EmptyResult));

        let mapped = degraded.map(|value| value * 10);
        assert_eq!(mapped.into_value(), 40);
    }

    #[test]
    fn test_degradation_display() {
        let degradation = Degradation::new(
            Phase::IntraLaidOut,
            Id::new("container-1:2"),
            SolverError::EmptyResult,
        );
        assert_eq!(
            degradation.to_string(),
            "intra-laid-out phase fell back for `container-1:2`: solver returned an empty result"
        );
    }
}
