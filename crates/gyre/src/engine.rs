use crate::error::ModelError;
use crate::geometry::{Point, Viewport, wrapped_delta};
use crate::ring::{Ring, RingId, RingModel};
use serde::{Deserialize, Serialize};

pub const EASING_FACTOR: f64 = 0.15; // share of the remaining distance covered per frame
pub const SNAP_THRESHOLD: f64 = 0.001; // radians

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Easing {
    pub factor: f64,
    pub snap_threshold: f64,
}

impl Default for Easing {
    fn default() -> Self {
        Self {
            factor: EASING_FACTOR,
            snap_threshold: SNAP_THRESHOLD,
        }
    }
}

impl Easing {
    pub fn new(factor: f64, snap_threshold: f64) -> Result<Self, ModelError> {
        let easing = Self {
            factor,
            snap_threshold,
        };
        easing.validate()?;
        Ok(easing)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.factor > 0.0 && self.factor <= 1.0) {
            return Err(ModelError::EasingFactor(self.factor));
        }
        if !(self.snap_threshold > 0.0 && self.snap_threshold.is_finite()) {
            return Err(ModelError::SnapThreshold(self.snap_threshold));
        }
        Ok(())
    }

    /// One frame of exponential approach. Not time-normalized: the host is
    /// expected to tick once per display refresh.
    pub fn step(&self, rotation: f64, target: f64) -> f64 {
        let delta = target - rotation;
        if delta.abs() < self.snap_threshold {
            target
        } else {
            rotation + delta * self.factor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        ring: RingId,
        /// Pointer angle at the previous sample, in canvas convention.
        last_angle: f64,
    },
}

impl Interaction {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn active_ring(&self) -> Option<RingId> {
        match self {
            Self::Dragging { ring, .. } => Some(*ring),
            Self::Idle => None,
        }
    }
}

/// Raw pointer or touch input in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Start(Point),
    Move(Point),
    End,
    /// Tracking was lost (pointer grab broken, touch sequence cancelled).
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct RotationEngine {
    viewport: Viewport,
    easing: Easing,
    interaction: Interaction,
}

impl RotationEngine {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn locate_ring<'m>(&self, model: &'m RingModel, point: Point) -> Option<&'m Ring> {
        let distance = self.viewport.to_wheel(point).distance_from_origin();
        model.ring_at(distance)
    }

    fn pointer_angle(&self, point: Point) -> f64 {
        self.viewport.to_wheel(point).angle()
    }

    pub fn handle(&mut self, model: &mut RingModel, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Start(point) => self.begin_drag(model, point),
            PointerEvent::Move(point) => self.drag_to(model, point),
            PointerEvent::End | PointerEvent::Cancel => self.end_drag(model),
        }
    }

    /// Starts dragging the ring under `point`. Points outside the wheel and
    /// rings that cannot be dragged are ignored.
    pub fn begin_drag(&mut self, model: &RingModel, point: Point) -> bool {
        let Some(ring) = self
            .locate_ring(model, point)
            .filter(|ring| ring.is_draggable())
        else {
            return false;
        };

        let last_angle = self.pointer_angle(point);
        log::debug!("Drag start on ring {} at {:.3} rad", ring.id(), last_angle);
        self.interaction = Interaction::Dragging {
            ring: ring.id(),
            last_angle,
        };
        true
    }

    /// Rotates the active ring by the angle swept since the previous sample.
    /// The ring follows the pointer directly, without easing.
    pub fn drag_to(&mut self, model: &mut RingModel, point: Point) -> bool {
        let Interaction::Dragging { ring, last_angle } = self.interaction else {
            return false;
        };
        let Some(current) = model.get(ring) else {
            self.interaction = Interaction::Idle;
            return false;
        };

        let angle = self.pointer_angle(point);
        let delta = wrapped_delta(angle, last_angle);
        let rotation = current.rotation() + delta;
        log::trace!("Ring {} rotated by {:.4} to {:.4}", ring, delta, rotation);

        model.set_rotation(ring, rotation);
        model.set_target_rotation(ring, rotation);
        self.interaction = Interaction::Dragging {
            ring,
            last_angle: angle,
        };
        true
    }

    /// Releases the active ring where it is; there is no snapping to segments.
    pub fn end_drag(&mut self, model: &mut RingModel) -> bool {
        let Some(ring) = self.interaction.active_ring() else {
            return false;
        };

        if let Some(rotation) = model.get(ring).map(Ring::rotation) {
            model.set_target_rotation(ring, rotation);
            log::debug!("Drag end on ring {} at rotation {:.4}", ring, rotation);
        }
        self.interaction = Interaction::Idle;
        true
    }

    /// Advances every ring by one frame. Returns whether any rotation changed.
    pub fn tick(&self, model: &mut RingModel) -> bool {
        let dragged = self.interaction.active_ring();
        let mut changed = false;

        for ring in model.rings_mut() {
            let next = if ring.is_static() {
                0.0
            } else if dragged == Some(ring.id()) {
                continue;
            } else {
                self.easing.step(ring.rotation(), ring.target_rotation())
            };

            if next != ring.rotation() {
                ring.set_rotation(next);
                changed = true;
            }
        }
        changed
    }
}
