//! Dimension annotation layout in device space.
//!
//! A dimension is laid out in a local frame of `(along, out)` coordinates,
//! where `along` runs parallel to the measured edge and `out` points away
//! from the geometry toward the dimension line. Each [`DimensionSide`] maps
//! that frame onto device axes, so the geometry code below is written once.
//!
//! Layout is a pure function of its request and measurer: identical inputs
//! give bit-identical segments, text anchor and text box. On-screen overlays
//! and export both go through [`layout_dimension`].

use rackplan_core::constants::{
    DIMENSION_BREAK_HALF_WIDTH_PX, DIMENSION_BREAK_HEIGHT_PX, DIMENSION_TEXT_GAP_PX,
};
use rackplan_core::{format_length, Bounds, DevicePoint, GlobalPoint, MeasurementSystem, Size};
use rackplan_settings::{ClearHeightSettings, DimensionSettings};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::coordinate::CoordinateSystem;
use crate::geometry::RectGeometry;
use crate::text::TextMeasurer;

/// Which side of the measured edge the dimension line is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionSide {
    Bottom,
    Top,
    Left,
    Right,
}

impl DimensionSide {
    /// Left and right dimensions measure along Y and carry rotated text.
    pub fn is_vertical(self) -> bool {
        matches!(self, DimensionSide::Left | DimensionSide::Right)
    }

    pub fn text_rotation_deg(self) -> f64 {
        if self.is_vertical() {
            90.0
        } else {
            0.0
        }
    }

    fn to_local(self, p: DevicePoint) -> (f64, f64) {
        match self {
            DimensionSide::Bottom => (p.x, p.y),
            DimensionSide::Top => (p.x, -p.y),
            DimensionSide::Right => (p.y, p.x),
            DimensionSide::Left => (p.y, -p.x),
        }
    }

    fn to_device(self, along: f64, out: f64) -> DevicePoint {
        match self {
            DimensionSide::Bottom => DevicePoint::new(along, out),
            DimensionSide::Top => DevicePoint::new(along, -out),
            DimensionSide::Right => DevicePoint::new(out, along),
            DimensionSide::Left => DevicePoint::new(-out, along),
        }
    }
}

/// Drafting break for values too large to draw to scale.
///
/// A value above `limit_coefficient * reference_max` is drawn with a
/// zig-zag in the dimension line and labelled with the limit instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakRule {
    pub limit_coefficient: f64,
    pub reference_max: f64,
}

impl BreakRule {
    pub fn new(limit_coefficient: f64, reference_max: f64) -> Self {
        Self {
            limit_coefficient,
            reference_max,
        }
    }

    /// The configured clear-height rule for `reference_max`, if enabled.
    pub fn from_settings(settings: &ClearHeightSettings, reference_max: f64) -> Option<Self> {
        settings
            .break_if_too_long
            .then(|| Self::new(settings.limit_coefficient, reference_max))
    }

    pub fn limit(&self) -> f64 {
        self.limit_coefficient * self.reference_max
    }

    /// True when `value` should be drawn broken.
    pub fn applies(&self, value: f64) -> bool {
        let limit = self.limit();
        limit.is_finite() && value.is_finite() && value > limit
    }
}

/// Input of one dimension layout. Anchors and sizes are in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionRequest {
    pub anchor1: DevicePoint,
    pub anchor2: DevicePoint,
    /// True measured value in millimetres.
    pub value: f64,
    /// Text shown instead of the formatted value.
    pub label: Option<String>,
    pub support_offset_px: f64,
    pub text_size_px: f64,
    pub perp_tick_offset_px: f64,
    pub side: DimensionSide,
    /// Puts the text between the dimension line and the geometry.
    pub mirror_text: bool,
    pub break_rule: Option<BreakRule>,
    pub collision_offset_px: f64,
    pub measurement_system: MeasurementSystem,
}

impl DimensionRequest {
    pub fn new(
        anchor1: DevicePoint,
        anchor2: DevicePoint,
        value: f64,
        side: DimensionSide,
        settings: &DimensionSettings,
    ) -> Self {
        Self {
            anchor1,
            anchor2,
            value,
            label: None,
            support_offset_px: settings.support_offset_px,
            text_size_px: settings.text_size_px,
            perp_tick_offset_px: settings.perp_tick_offset_px,
            side,
            mirror_text: false,
            break_rule: None,
            collision_offset_px: 0.0,
            measurement_system: settings.measurement_system,
        }
    }

    /// Dimension between two sheet points, valued along the side's axis.
    pub fn from_global(
        coords: &CoordinateSystem,
        g1: GlobalPoint,
        g2: GlobalPoint,
        side: DimensionSide,
        settings: &DimensionSettings,
    ) -> Self {
        let value = if side.is_vertical() {
            (g2.y - g1.y).abs()
        } else {
            (g2.x - g1.x).abs()
        };
        Self::new(coords.project(g1), coords.project(g2), value, side, settings)
    }

    pub fn with_mirror_text(mut self, mirror: bool) -> Self {
        self.mirror_text = mirror;
        self
    }

    pub fn with_break_rule(mut self, rule: Option<BreakRule>) -> Self {
        self.break_rule = rule;
        self
    }

    pub fn with_collision_offset(mut self, offset_px: f64) -> Self {
        self.collision_offset_px = offset_px;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn is_usable(&self) -> bool {
        self.anchor1.is_finite()
            && self.anchor2.is_finite()
            && self.support_offset_px.is_finite()
            && self.text_size_px.is_finite()
            && self.perp_tick_offset_px.is_finite()
            && self.collision_offset_px.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Extension line from an anchor out past the dimension line.
    Support,
    DimensionLine,
    /// Perpendicular mark at a dimension line end.
    Tick,
    /// Leg of the zig-zag break glyph.
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSegment {
    pub start: DevicePoint,
    pub end: DevicePoint,
    pub kind: SegmentKind,
}

/// Renderable output of a dimension layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLayout {
    pub segments: SmallVec<[DimensionSegment; 12]>,
    pub text: String,
    /// Centre of the text box.
    pub text_anchor: DevicePoint,
    pub text_rotation_deg: f64,
    /// Unrotated text extent as measured.
    pub text_size: Size,
    /// Device-space box the rotated text occupies.
    pub text_box: Bounds,
    pub is_broken: bool,
    pub displayed_value: f64,
}

impl DimensionLayout {
    /// Neutral result for unusable input: nothing to draw.
    pub fn empty() -> Self {
        Self {
            segments: SmallVec::new(),
            text: String::new(),
            text_anchor: DevicePoint::ORIGIN,
            text_rotation_deg: 0.0,
            text_size: Size::ZERO,
            text_box: Bounds::default(),
            is_broken: false,
            displayed_value: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &DimensionSegment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}

/// Lays out one dimension.
///
/// The dimension line sits `max(support_offset_px, minimum)` beyond the
/// outermost anchor, where the minimum keeps ticks and text off the
/// geometry. Text is centred along the line on its outer side, or its inner
/// side when mirrored. The collision offset pushes the text further out; a
/// mirrored label takes the dimension line with it.
pub fn layout_dimension(request: &DimensionRequest, measurer: &dyn TextMeasurer) -> DimensionLayout {
    if !request.is_usable() {
        debug!("Skipping dimension with non-finite input");
        return DimensionLayout::empty();
    }

    let side = request.side;
    let is_broken = request
        .break_rule
        .is_some_and(|rule| rule.applies(request.value));
    let displayed_value = match request.break_rule {
        Some(rule) if is_broken => rule.limit(),
        _ => request.value,
    };
    let text = match &request.label {
        Some(label) => label.clone(),
        None => format_length(displayed_value, request.measurement_system),
    };
    let text_size = measurer.measure(&text, request.text_size_px);
    let thickness = text_size.height;

    let tick = request.perp_tick_offset_px.max(0.0);
    let gap = DIMENSION_TEXT_GAP_PX;
    let collision = request.collision_offset_px.max(0.0);
    // The break glyph stands proud of the line; text must clear it too.
    let clearance = if is_broken {
        tick.max(DIMENSION_BREAK_HEIGHT_PX)
    } else {
        tick
    };

    // Mirrored text lives under the line, so the collision offset moves the
    // line and text out together.
    let offset = if request.mirror_text {
        request
            .support_offset_px
            .max(clearance + 2.0 * gap + thickness)
            + collision
    } else {
        request.support_offset_px.max(clearance + gap)
    };

    let (a1, o1) = side.to_local(request.anchor1);
    let (a2, o2) = side.to_local(request.anchor2);
    let level = o1.max(o2) + offset;
    let (lo, hi) = if a1 <= a2 { (a1, a2) } else { (a2, a1) };
    let mid = (lo + hi) / 2.0;

    let seg = |kind, (sa, so): (f64, f64), (ea, eo): (f64, f64)| DimensionSegment {
        start: side.to_device(sa, so),
        end: side.to_device(ea, eo),
        kind,
    };

    let mut segments: SmallVec<[DimensionSegment; 12]> = SmallVec::new();
    segments.push(seg(SegmentKind::Support, (a1, o1), (a1, level + tick)));
    segments.push(seg(SegmentKind::Support, (a2, o2), (a2, level + tick)));

    if is_broken {
        let half = DIMENSION_BREAK_HALF_WIDTH_PX.min((hi - lo) / 2.0);
        let jog = DIMENSION_BREAK_HEIGHT_PX;
        let left = mid - half;
        let right = mid + half;
        segments.push(seg(SegmentKind::DimensionLine, (lo, level), (left, level)));
        segments.push(seg(
            SegmentKind::Break,
            (left, level),
            (mid - half / 3.0, level - jog),
        ));
        segments.push(seg(
            SegmentKind::Break,
            (mid - half / 3.0, level - jog),
            (mid + half / 3.0, level + jog),
        ));
        segments.push(seg(
            SegmentKind::Break,
            (mid + half / 3.0, level + jog),
            (right, level),
        ));
        segments.push(seg(SegmentKind::DimensionLine, (right, level), (hi, level)));
    } else {
        segments.push(seg(SegmentKind::DimensionLine, (lo, level), (hi, level)));
    }

    segments.push(seg(SegmentKind::Tick, (lo, level - tick), (lo, level + tick)));
    segments.push(seg(SegmentKind::Tick, (hi, level - tick), (hi, level + tick)));

    let text_distance = clearance + gap + thickness / 2.0;
    let text_out = if request.mirror_text {
        level - text_distance
    } else {
        level + text_distance + collision
    };
    let text_anchor = side.to_device(mid, text_out);
    let box_size = if side.is_vertical() {
        Size::new(text_size.height, text_size.width)
    } else {
        text_size
    };
    let text_box = Bounds::centered(text_anchor.x, text_anchor.y, box_size);

    trace!(
        "Dimension {:?} '{}' at level {:.2}, broken: {}",
        side,
        text,
        level,
        is_broken
    );

    DimensionLayout {
        segments,
        text,
        text_anchor,
        text_rotation_deg: side.text_rotation_deg(),
        text_size,
        text_box,
        is_broken,
        displayed_value,
    }
}

/// Lays out several dimensions, moving each label away from labels already
/// placed.
///
/// Best effort: a label whose text box overlaps an earlier one is retried
/// with the collision offset grown by `collision_step_px`. After
/// `max_collision_attempts` tries the last attempt is kept even if it still
/// overlaps.
pub fn place_dimensions(
    requests: &[DimensionRequest],
    measurer: &dyn TextMeasurer,
    settings: &DimensionSettings,
) -> Vec<DimensionLayout> {
    let attempts = settings.max_collision_attempts.max(1);
    let mut placed: Vec<DimensionLayout> = Vec::with_capacity(requests.len());

    for request in requests {
        let mut layout = layout_dimension(request, measurer);
        for attempt in 1..attempts {
            let collides = !layout.is_empty()
                && placed
                    .iter()
                    .any(|p| !p.is_empty() && p.text_box.overlaps(&layout.text_box));
            if !collides {
                break;
            }
            let bumped = request
                .clone()
                .with_collision_offset(
                    request.collision_offset_px + attempt as f64 * settings.collision_step_px,
                );
            layout = layout_dimension(&bumped, measurer);
        }
        placed.push(layout);
    }

    placed
}

/// "Selected geometry info" overlay: length (X extent) above the rectangle,
/// width (Y extent) to its left.
pub fn rect_dimensions(
    coords: &CoordinateSystem,
    geom: &RectGeometry,
    settings: &DimensionSettings,
    measurer: &dyn TextMeasurer,
) -> Vec<DimensionLayout> {
    let requests = [
        DimensionRequest::from_global(
            coords,
            geom.top_left(),
            geom.top_right(),
            DimensionSide::Top,
            settings,
        ),
        DimensionRequest::from_global(
            coords,
            geom.top_left(),
            geom.bottom_left(),
            DimensionSide::Left,
            settings,
        ),
    ];
    place_dimensions(&requests, measurer, settings)
}
