use crate::error::{ColorError, ModelError};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct RingId(u32);

impl RingId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct LabelText(String);

crate::impl_string_newtype!(LabelText);

/// Text of one segment: a single line, or lines stacked across the band
/// (first line nearest the center).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Line(LabelText),
    Stacked(Vec<LabelText>),
}

impl Label {
    pub fn lines(&self) -> &[LabelText] {
        match self {
            Self::Line(line) => std::slice::from_ref(line),
            Self::Stacked(lines) => lines,
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Line(LabelText::new(text))
    }
}

/// An opaque sRGB color written as `#rrggbb` or a CSS color name.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_rgba(&self) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Srgb::<u8>::from_str(s)
            .ok()
            .or_else(|| palette::named::from_str(&s.to_ascii_lowercase()))
            .map(Self)
            .ok_or_else(|| ColorError(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

fn default_text_color() -> HexColor {
    HexColor::white()
}

fn default_font_size() -> f64 {
    14.0
}

/// Static description of one ring, as it appears in the configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub id: RingId,
    pub radius: f64,
    pub color: HexColor,
    #[serde(default = "default_text_color")]
    pub text_color: HexColor,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub draggable: bool,
    /// Starting orientation, also where [`crate::Wheel::reset`] returns to.
    #[serde(default)]
    pub rotation: f64,
    /// Radius of the text baseline; the middle of the band when unset.
    #[serde(default)]
    pub text_radius: Option<f64>,
    /// Upright text drawn at the wheel center.
    #[serde(default)]
    pub label: Option<LabelText>,
    #[serde(default)]
    pub segments: Vec<Label>,
}

impl RingSpec {
    pub fn new(id: u32, radius: f64, color: HexColor) -> Self {
        Self {
            id: RingId::new(id),
            radius,
            color,
            text_color: default_text_color(),
            font_size: default_font_size(),
            is_static: false,
            draggable: false,
            rotation: 0.0,
            text_radius: None,
            label: None,
            segments: Vec::new(),
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self.draggable = false;
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_text_radius(mut self, text_radius: f64) -> Self {
        self.text_radius = Some(text_radius);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(LabelText::new(label));
        self
    }

    pub fn with_segments(mut self, segments: impl IntoIterator<Item = Label>) -> Self {
        self.segments = segments.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Ring {
    spec: RingSpec,
    inner_radius: f64,
    text_radius: f64,
    rotation: f64,
    target_rotation: f64,
}

impl Ring {
    fn new(spec: RingSpec, inner_radius: f64) -> Self {
        let text_radius = spec
            .text_radius
            .unwrap_or((inner_radius + spec.radius) / 2.0);
        let rotation = if spec.is_static { 0.0 } else { spec.rotation };
        Self {
            spec,
            inner_radius,
            text_radius,
            rotation,
            target_rotation: rotation,
        }
    }

    pub fn id(&self) -> RingId {
        self.spec.id
    }

    pub fn radius(&self) -> f64 {
        self.spec.radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn text_radius(&self) -> f64 {
        self.text_radius
    }

    pub fn color(&self) -> HexColor {
        self.spec.color
    }

    pub fn text_color(&self) -> HexColor {
        self.spec.text_color
    }

    pub fn font_size(&self) -> f64 {
        self.spec.font_size
    }

    pub fn is_static(&self) -> bool {
        self.spec.is_static
    }

    pub fn is_draggable(&self) -> bool {
        self.spec.draggable && !self.spec.is_static
    }

    pub fn label(&self) -> Option<&LabelText> {
        self.spec.label.as_ref()
    }

    pub fn segments(&self) -> &[Label] {
        &self.spec.segments
    }

    /// Angular width of one segment, `None` for rings without segments.
    pub fn segment_arc(&self) -> Option<f64> {
        match self.spec.segments.len() {
            0 => None,
            n => Some(TAU / n as f64),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    pub fn initial_rotation(&self) -> f64 {
        if self.spec.is_static {
            0.0
        } else {
            self.spec.rotation
        }
    }

    pub(crate) fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub(crate) fn set_target_rotation(&mut self, target: f64) {
        self.target_rotation = target;
    }

    /// Band membership: open at the inner edge, closed at the outer edge.
    pub fn contains(&self, distance: f64) -> bool {
        distance > self.inner_radius && distance <= self.spec.radius
    }
}

/// Every ring of the wheel, innermost first.
#[derive(Debug, Clone)]
pub struct RingModel {
    rings: Vec<Ring>,
}

impl RingModel {
    pub fn new(specs: Vec<RingSpec>) -> Result<Self, ModelError> {
        if specs.is_empty() {
            return Err(ModelError::Empty);
        }

        let mut rings = Vec::with_capacity(specs.len());
        let mut previous = 0.0;

        for (index, spec) in specs.into_iter().enumerate() {
            Self::validate(index, &spec, previous)?;
            let inner = previous;
            previous = spec.radius;
            rings.push(Ring::new(spec, inner));
        }

        Ok(Self { rings })
    }

    fn validate(index: usize, spec: &RingSpec, previous: f64) -> Result<(), ModelError> {
        let expected = RingId::new(index as u32 + 1);
        if spec.id != expected {
            return Err(ModelError::NonContiguousId {
                expected,
                found: spec.id,
            });
        }
        if !spec.radius.is_finite() {
            return Err(ModelError::NonFiniteRadius {
                id: spec.id,
                radius: spec.radius,
            });
        }
        if spec.radius <= previous {
            return Err(ModelError::RadiusNotAscending {
                id: spec.id,
                radius: spec.radius,
                previous,
            });
        }
        if !spec.rotation.is_finite() {
            return Err(ModelError::Rotation {
                id: spec.id,
                rotation: spec.rotation,
            });
        }
        if let Some(radius) = spec
            .text_radius
            .filter(|r| !(r.is_finite() && *r > 0.0))
        {
            return Err(ModelError::TextRadius { id: spec.id, radius });
        }
        if spec.font_size.is_nan() || spec.font_size <= 0.0 {
            return Err(ModelError::FontSize {
                id: spec.id,
                size: spec.font_size,
            });
        }
        if spec.is_static && spec.draggable {
            return Err(ModelError::StaticDraggable { id: spec.id });
        }
        if let Some((segment, label)) = spec
            .segments
            .iter()
            .enumerate()
            .find(|(_, label)| !(1..=2).contains(&label.lines().len()))
        {
            return Err(ModelError::LineCount {
                id: spec.id,
                segment,
                lines: label.lines().len(),
            });
        }
        Ok(())
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn get(&self, id: RingId) -> Option<&Ring> {
        self.index(id).map(|i| &self.rings[i])
    }

    pub fn outer_radius(&self) -> f64 {
        self.rings.last().map(Ring::radius).unwrap_or_default()
    }

    /// Scans from the outermost ring inwards for the band containing `distance`.
    pub fn ring_at(&self, distance: f64) -> Option<&Ring> {
        self.rings.iter().rev().find(|ring| ring.contains(distance))
    }

    pub(crate) fn rings_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        self.rings.iter_mut()
    }

    pub(crate) fn set_rotation(&mut self, id: RingId, rotation: f64) {
        if let Some(ring) = self.ring_mut(id) {
            ring.set_rotation(rotation);
        }
    }

    pub(crate) fn set_target_rotation(&mut self, id: RingId, target: f64) {
        if let Some(ring) = self.ring_mut(id) {
            ring.set_target_rotation(target);
        }
    }

    fn ring_mut(&mut self, id: RingId) -> Option<&mut Ring> {
        self.index(id).map(|i| &mut self.rings[i])
    }

    fn index(&self, id: RingId) -> Option<usize> {
        let index = (id.get() as usize).checked_sub(1)?;
        (index < self.rings.len()).then_some(index)
    }
}
