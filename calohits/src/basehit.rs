use std::fmt;

use spacemath::Point3;

/// Read access to the fields every spatial energy-deposit record carries.
pub trait XyzeHit {
    fn position(&self) -> Point3;
    fn time(&self) -> f64;
    fn energy_loss(&self) -> f64;
    fn track_id(&self) -> i32;
    fn detector_id(&self) -> i32;

    fn x(&self) -> f64 {
        self.position().x
    }

    fn y(&self) -> f64 {
        self.position().y
    }

    fn z(&self) -> f64 {
        self.position().z
    }
}

/// Position, time and deposited energy of a single transport step, tagged
/// with the track that made it and the detector cell it landed in.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BaseHit {
    pos: Point3,
    time: f64,
    energy_loss: f64,
    track_id: i32,
    detector_id: i32,
}

impl BaseHit {
    pub fn new(x: f64, y: f64, z: f64, time: f64, energy_loss: f64, track_id: i32, detector_id: i32) -> Self {
        BaseHit {
            pos: Point3::new(x, y, z),
            time,
            energy_loss,
            track_id,
            detector_id,
        }
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn set_energy_loss(&mut self, energy_loss: f64) {
        self.energy_loss = energy_loss;
    }

    pub fn set_track_id(&mut self, track_id: i32) {
        self.track_id = track_id;
    }

    pub fn set_detector_id(&mut self, detector_id: i32) {
        self.detector_id = detector_id;
    }

    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.pos = Point3::new(x, y, z);
    }

    pub fn set_position(&mut self, pos: Point3) {
        self.pos = pos;
    }
}

impl XyzeHit for BaseHit {
    fn position(&self) -> Point3 {
        self.pos
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn energy_loss(&self) -> f64 {
        self.energy_loss
    }

    fn track_id(&self) -> i32 {
        self.track_id
    }

    fn detector_id(&self) -> i32 {
        self.detector_id
    }
}

impl fmt::Display for BaseHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track {} in detector segment {} at position {}, time {}, energy loss {}",
            self.track_id, self.detector_id, self.pos, self.time, self.energy_loss)
    }
}
