use crate::engine::{Easing, Interaction, PointerEvent, RotationEngine};
use crate::error::ModelError;
use crate::geometry::Viewport;
use crate::layout::TextMetrics;
use crate::render::{self, DrawOp};
use crate::ring::{RingId, RingModel, RingSpec};

/// Owns the ring model and the interaction state. The host feeds it pointer
/// events, calls [`Wheel::tick`] once per frame and then draws [`Wheel::frame`].
#[derive(Debug, Clone)]
pub struct Wheel {
    model: RingModel,
    engine: RotationEngine,
}

impl Wheel {
    pub fn new(specs: Vec<RingSpec>, easing: Easing) -> Result<Self, ModelError> {
        easing.validate()?;
        Ok(Self {
            model: RingModel::new(specs)?,
            engine: RotationEngine::new(easing),
        })
    }

    pub fn model(&self) -> &RingModel {
        &self.model
    }

    pub fn interaction(&self) -> Interaction {
        self.engine.interaction()
    }

    pub fn viewport(&self) -> Viewport {
        self.engine.viewport()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.engine.set_viewport(viewport);
    }

    /// Refits the wheel into a resized canvas.
    pub fn resize(&mut self, width: f64, height: f64, fill: f64) {
        let viewport = Viewport::fit(width, height, self.model.outer_radius(), fill);
        self.engine.set_viewport(viewport);
    }

    pub fn handle(&mut self, event: PointerEvent) -> bool {
        self.engine.handle(&mut self.model, event)
    }

    pub fn tick(&mut self) -> bool {
        self.engine.tick(&mut self.model)
    }

    pub fn frame(&self, metrics: &impl TextMetrics) -> Vec<DrawOp> {
        render::compose(&self.model, metrics)
    }

    /// Eases ring `id` towards `target`. Static rings and the ring under the
    /// pointer are left alone.
    pub fn spin(&mut self, id: RingId, target: f64) -> bool {
        let movable = self
            .model
            .get(id)
            .is_some_and(|ring| !ring.is_static())
            && self.engine.interaction().active_ring() != Some(id);
        if movable {
            log::debug!("Spinning ring {} to {:.4}", id, target);
            self.model.set_target_rotation(id, target);
        }
        movable
    }

    /// Sends every ring back to its starting orientation.
    pub fn reset(&mut self) {
        let targets: Vec<_> = self
            .model
            .rings()
            .iter()
            .map(|ring| (ring.id(), ring.initial_rotation()))
            .collect();
        for (id, target) in targets {
            self.spin(id, target);
        }
    }

    /// Nothing is being dragged and every ring has reached its target.
    pub fn is_settled(&self) -> bool {
        !self.engine.interaction().is_dragging()
            && self.model.rings().iter().all(|ring| {
                ring.is_static() && ring.rotation() == 0.0
                    || ring.rotation() == ring.target_rotation()
            })
    }
}
