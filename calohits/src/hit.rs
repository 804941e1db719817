use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::ops;

use spacemath::{Point3, Vector3};

use crate::basehit::{BaseHit, XyzeHit};
use crate::error::HitError;

/// Calorimeter simulation hit.
///
/// A hit is the energy a primary particle's lineage deposited in one
/// detector cell during one transport step. Two hits are the same logical
/// deposit when they share the primary and the detector cell, so equality,
/// ordering and hashing only look at `(primary, detector_id)`. Position,
/// time and momentum are carried along but never compared.
///
/// Merging (`+=`, `+`, [`Hit::merge_into`]) accumulates the energy loss of
/// the right hand side into the left hand side and keeps everything else
/// from the left hand side.
#[derive(Debug, Copy, Clone, Default)]
pub struct Hit {
    base: BaseHit,
    momentum: Vector3,
    primary: i32,
    // Only the origin tracking energy is allowed to lose precision
    initial_energy: f32,
}

impl Hit {
    /// Fully defined hit as produced by one transport step.
    ///
    /// * `primary` - index of the primary particle at the origin of the hit
    /// * `track_id` - index of the track, the parent track entering the calorimeter
    /// * `detector_id` - id of the detector segment
    /// * `initial_energy` - energy of the primary particle entering the calorimeter
    /// * `pos` - position of the step
    /// * `mom` - momentum of the particle at the step
    /// * `tof` - time of the hit
    /// * `energy_loss` - energy deposited by the step
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        primary: i32,
        track_id: i32,
        detector_id: i32,
        initial_energy: f64,
        pos: Point3,
        mom: Vector3,
        tof: f64,
        energy_loss: f64,
    ) -> Self {
        Hit {
            base: BaseHit::new(pos.x, pos.y, pos.z, tof, energy_loss, track_id, detector_id),
            momentum: mom,
            primary,
            initial_energy: initial_energy as f32,
        }
    }

    pub fn base(&self) -> &BaseHit {
        &self.base
    }

    pub fn momentum(&self) -> Vector3 {
        self.momentum
    }

    pub fn primary(&self) -> i32 {
        self.primary
    }

    pub fn set_primary(&mut self, primary: i32) {
        self.primary = primary;
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy as f64
    }

    pub fn set_initial_energy(&mut self, energy: f64) {
        self.initial_energy = energy as f32;
    }

    pub fn identity(&self) -> (i32, i32) {
        (self.primary, self.base.detector_id())
    }

    /// Same parent particle and same detector volume.
    pub fn same_identity(&self, other: &Hit) -> bool {
        self.identity() == other.identity()
    }

    /// Sorts by parent particle first, then by detector volume.
    pub fn cmp_identity(&self, other: &Hit) -> Ordering {
        self.identity().cmp(&other.identity())
    }

    /// Adds the energy loss of `rhs` to this hit and returns it for chaining.
    ///
    /// Both hits must have the same identity; this is only checked in debug
    /// builds. Use [`Hit::try_merge`] when the operands are not known to match.
    pub fn merge_into(&mut self, rhs: &Hit) -> &mut Self {
        debug_assert!(
            self.same_identity(rhs),
            "merging hit {:?} into hit {:?}", rhs.identity(), self.identity()
        );
        let summed = self.base.energy_loss() + rhs.base.energy_loss();
        self.base.set_energy_loss(summed);
        self
    }

    /// New hit based on this one with the energy loss of `rhs` added.
    pub fn merged(&self, rhs: &Hit) -> Hit {
        let mut result = *self;
        result.merge_into(rhs);
        result
    }

    pub fn try_merge(&mut self, rhs: &Hit) -> Result<&mut Self, HitError> {
        if !self.same_identity(rhs) {
            return Err(HitError::IdentityMismatch {
                expected: self.identity(),
                found: rhs.identity(),
            });
        }
        Ok(self.merge_into(rhs))
    }

    /// Writes the hit as a single line to `stream`.
    pub fn print_stream<W: io::Write + ?Sized>(&self, stream: &mut W) -> io::Result<()> {
        writeln!(stream, "{}", self)
    }
}

impl XyzeHit for Hit {
    fn position(&self) -> Point3 {
        self.base.position()
    }

    fn time(&self) -> f64 {
        self.base.time()
    }

    fn energy_loss(&self) -> f64 {
        self.base.energy_loss()
    }

    fn track_id(&self) -> i32 {
        self.base.track_id()
    }

    fn detector_id(&self) -> i32 {
        self.base.detector_id()
    }
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Hit {}

impl PartialOrd for Hit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_identity(other)
    }
}

impl Hash for Hit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl ops::AddAssign<&Hit> for Hit {
    fn add_assign(&mut self, rhs: &Hit) {
        self.merge_into(rhs);
    }
}

impl ops::AddAssign<Hit> for Hit {
    fn add_assign(&mut self, rhs: Hit) {
        self.merge_into(&rhs);
    }
}

impl ops::Add<&Hit> for &Hit {
    type Output = Hit;

    fn add(self, rhs: &Hit) -> Hit {
        self.merged(rhs)
    }
}

impl ops::Add<Hit> for Hit {
    type Output = Hit;

    fn add(self, rhs: Hit) -> Hit {
        self.merged(&rhs)
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Calorimeter point: {}, momentum {}, parent {} with energy {}",
            self.base, self.momentum, self.primary, self.initial_energy)
    }
}
