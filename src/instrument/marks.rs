//! Pitch ladder and roll scale layout tables
//!
//! Offsets and angles are nominal: pitch offsets are multiplied by the
//! pitch-scale-factor before use, roll angles are relative to the top of
//! the face and get the current roll added on every update.

use crate::scene::NodeId;

/// Rung stroke weight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RungWeight {
    /// `line_width / 2`
    Major,
    /// `line_width / 3`
    Minor,
}

impl RungWeight {
    pub fn stroke_width(&self, line_width: f32) -> f32 {
        match self {
            RungWeight::Major => line_width / 2.0,
            RungWeight::Minor => line_width / 3.0,
        }
    }
}

/// One rung of the pitch ladder
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchRung {
    /// Vertical offset from center at zoom 1, before scaling
    pub offset: f32,
    /// Half the rung length
    pub half_width: f32,
    pub weight: RungWeight,
    /// Horizontal distance of the paired labels from center, if labelled
    pub label_dx: Option<f32>,
}

impl PitchRung {
    const fn new(offset: f32, half_width: f32, weight: RungWeight, label_dx: Option<f32>) -> Self {
        Self {
            offset,
            half_width,
            weight,
            label_dx,
        }
    }

    /// Label text, the unsigned offset ("30" for both +30 and -30)
    pub fn label(&self) -> Option<String> {
        self.label_dx.map(|_| format!("{}", self.offset.abs()))
    }
}

/// Pitch ladder from top to bottom
pub const PITCH_LADDER: [PitchRung; 14] = [
    PitchRung::new(120.0, 30.0, RungWeight::Major, Some(50.0)),
    PitchRung::new(90.0, 10.0, RungWeight::Minor, None),
    PitchRung::new(60.0, 35.0, RungWeight::Major, Some(50.0)),
    PitchRung::new(45.0, 15.0, RungWeight::Minor, None),
    PitchRung::new(30.0, 30.0, RungWeight::Major, Some(45.0)),
    PitchRung::new(20.0, 15.0, RungWeight::Major, None),
    PitchRung::new(10.0, 10.0, RungWeight::Minor, None),
    PitchRung::new(-10.0, 10.0, RungWeight::Minor, None),
    PitchRung::new(-20.0, 15.0, RungWeight::Major, None),
    PitchRung::new(-30.0, 30.0, RungWeight::Major, Some(45.0)),
    PitchRung::new(-45.0, 15.0, RungWeight::Minor, None),
    PitchRung::new(-60.0, 35.0, RungWeight::Major, Some(50.0)),
    PitchRung::new(-90.0, 10.0, RungWeight::Minor, None),
    PitchRung::new(-120.0, 30.0, RungWeight::Major, Some(50.0)),
];

/// Shape of a roll tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollTickStyle {
    /// Filled triangle marking wings-level
    Pointer,
    /// Small dot
    Dot,
    /// Long tick, full bezel depth
    Major,
    /// Short tick, inner half of the bezel
    Minor,
}

/// One mark on the roll scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollTick {
    /// Angle from the top of the face in degrees
    pub angle: f32,
    pub style: RollTickStyle,
}

impl RollTick {
    const fn new(angle: f32, style: RollTickStyle) -> Self {
        Self { angle, style }
    }
}

/// Roll scale from left to right
pub const ROLL_SCALE: [RollTick; 11] = [
    RollTick::new(-60.0, RollTickStyle::Major),
    RollTick::new(-45.0, RollTickStyle::Dot),
    RollTick::new(-30.0, RollTickStyle::Major),
    RollTick::new(-20.0, RollTickStyle::Minor),
    RollTick::new(-10.0, RollTickStyle::Minor),
    RollTick::new(0.0, RollTickStyle::Pointer),
    RollTick::new(10.0, RollTickStyle::Minor),
    RollTick::new(20.0, RollTickStyle::Minor),
    RollTick::new(30.0, RollTickStyle::Major),
    RollTick::new(45.0, RollTickStyle::Dot),
    RollTick::new(60.0, RollTickStyle::Major),
];

/// A pitch ladder node paired with its nominal offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchMark {
    pub node: NodeId,
    pub offset: f32,
}

/// A roll scale node paired with its nominal angle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollMark {
    pub node: NodeId,
    pub angle: f32,
}
