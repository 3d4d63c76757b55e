//! Photon state

use crate::base::*;
use crate::geometry::*;

/// Stage of a photon's random walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhotonFate {
    /// Emitted from the aperture; no interaction yet.
    Launched,

    /// Has scattered at least once and is still travelling.
    Scattering,

    /// Terminated by absorption.
    Absorbed,

    /// Terminated by leaving the grid.
    Exited,
}

impl PhotonFate {
    /// Returns `true` for the terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Absorbed | Self::Exited)
    }
}

/// Transient state of one photon during a walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhotonState {
    /// Position.
    pub p: Point3f,

    /// Unit direction of travel.
    pub d: Vector3f,

    /// Statistical weight.
    pub weight: Float,

    /// Current stage of the walk.
    pub fate: PhotonFate,
}

impl PhotonState {
    /// Returns a newly launched photon with unit weight.
    ///
    /// * `p` - Starting position.
    /// * `d` - Unit starting direction.
    pub fn launch(p: Point3f, d: Vector3f) -> Self {
        Self {
            p,
            d,
            weight: 1.0,
            fate: PhotonFate::Launched,
        }
    }

    /// Returns the photon with its statistical weight replaced.
    ///
    /// * `weight` - New weight.
    pub fn with_weight(self, weight: Float) -> Self {
        Self { weight, ..self }
    }

    /// Returns `true` while the walk continues.
    pub fn is_alive(&self) -> bool {
        !self.fate.is_terminal()
    }

    /// Moves the photon along its direction.
    ///
    /// * `distance` - Distance to travel.
    pub fn advance(&mut self, distance: Float) {
        self.p += self.d * distance;
    }

    /// Changes direction after a scattering event.
    ///
    /// * `d` - New unit direction.
    pub fn scatter(&mut self, d: Vector3f) {
        self.d = d;
        self.fate = PhotonFate::Scattering;
    }

    /// Terminates the walk by absorption.
    pub fn absorb(&mut self) {
        self.weight = 0.0;
        self.fate = PhotonFate::Absorbed;
    }

    /// Terminates the walk by leaving the grid.
    pub fn exit(&mut self) {
        self.fate = PhotonFate::Exited;
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions() {
        let mut photon = PhotonState::launch(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(photon.fate, PhotonFate::Launched);
        assert_eq!(photon.weight, 1.0);
        assert!(photon.is_alive());

        photon.advance(2.0);
        assert_eq!(photon.p, Point3f::new(0.0, 0.0, 2.0));

        photon.scatter(Vector3f::new(1.0, 0.0, 0.0));
        assert_eq!(photon.fate, PhotonFate::Scattering);
        assert!(photon.is_alive());

        photon.absorb();
        assert!(!photon.is_alive());
        assert_eq!(photon.weight, 0.0);
    }

    #[test]
    fn launch_weight_can_be_replaced() {
        let photon = PhotonState::launch(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0))
            .with_weight(0.25);
        assert_eq!(photon.weight, 0.25);
        assert_eq!(photon.fate, PhotonFate::Launched);
    }

    #[test]
    fn exit_is_terminal() {
        let mut photon = PhotonState::launch(Point3f::zero(), Vector3f::new(0.0, 1.0, 0.0));
        photon.exit();
        assert!(photon.fate.is_terminal());
    }
}
