use super::{Point2, Point3, Rotation3, Vector3, TOLERANCE};

/// A local projection frame that turns a direction into the +Y axis.
///
/// The rotation is composed from a turn about Z followed by a turn about the
/// new X axis. Each angle comes from `atan2`; when both inputs to an angle are
/// below [`TOLERANCE`] that step is the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    origin: Point3,
    rotation: Rotation3,
    z_step_skipped: bool,
    x_step_skipped: bool,
}

impl LocalFrame {
    /// Builds the frame centred at `origin` that maps `direction` onto +Y.
    ///
    /// `direction` does not need to be normalized. A zero vector yields the
    /// identity rotation with both steps skipped.
    #[must_use]
    pub fn new(origin: Point3, direction: &Vector3) -> Self {
        let (x, y, z) = (direction.x, direction.y, direction.z);

        // About Z: bring the direction into the YZ plane on the +Y side.
        let z_step_skipped = x.abs() < TOLERANCE && y.abs() < TOLERANCE;
        let about_z = if z_step_skipped {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&Vector3::z_axis(), x.atan2(y))
        };

        // About X: drop the remaining Z component.
        let partial = about_z * direction;
        let x_step_skipped = partial.y.abs() < TOLERANCE && z.abs() < TOLERANCE;
        let about_x = if x_step_skipped {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&Vector3::x_axis(), (-partial.z).atan2(partial.y))
        };

        Self {
            origin,
            rotation: about_x * about_z,
            z_step_skipped,
            x_step_skipped,
        }
    }

    /// The composed rotation.
    #[must_use]
    pub fn rotation(&self) -> &Rotation3 {
        &self.rotation
    }

    /// `true` if both rotation steps fell back to the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.z_step_skipped && self.x_step_skipped
    }

    /// `true` if the rotation about Z fell back to the identity.
    #[must_use]
    pub fn z_step_skipped(&self) -> bool {
        self.z_step_skipped
    }

    /// `true` if the rotation about X fell back to the identity.
    #[must_use]
    pub fn x_step_skipped(&self) -> bool {
        self.x_step_skipped
    }

    /// Rotates a world point about the frame origin.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotation * (point - self.origin))
    }

    /// Projects a world point onto the local test plane as `(x, z)`.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let local = self.to_local(point);
        Point2::new(local.x, local.z)
    }
}
