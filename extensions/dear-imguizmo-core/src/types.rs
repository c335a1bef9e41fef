//! Core data types and enumerations
//!
//! Operation and mode selectors, the axis/plane vocabulary shared by hover
//! testing and the drag state machine, viewport rectangles and widget ids.

use std::fmt;

use bitflags::bitflags;

/// 2D vector for screen coordinates and sizes
pub type Vec2 = glam::Vec2;

/// 3D vector for world coordinates
pub type Vec3 = glam::Vec3;

/// 4D vector for homogeneous coordinates
pub type Vec4 = glam::Vec4;

/// 4x4 column-major transformation matrix
pub type Mat4 = glam::Mat4;

/// Tolerance used for parallel-ray, zero-length and snap checks
pub const EPSILON: f32 = 1e-6;

/// Transformation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Mode {
    /// Manipulate along the object's own (normalized) axes
    #[default]
    Local = 0,
    /// Manipulate along the world axes, at the object's origin
    World = 1,
}

/// Manipulation a widget is performing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    /// No drag in progress
    #[default]
    None,
    /// Translation along an axis, in a plane or in screen space
    Translate,
    /// Rotation around an axis or the view direction
    Rotate,
    /// Per-axis or uniform scale
    Scale,
    /// Resizing a local bounding box by its corner or edge handles
    BoundsScale,
}

impl Operation {
    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Operation::None => "None",
            Operation::Translate => "Translate",
            Operation::Rotate => "Rotate",
            Operation::Scale => "Scale",
            Operation::BoundsScale => "BoundsScale",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three cardinal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All axes in index order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis in a transform
    pub fn index(self) -> usize {
        self as usize
    }

    /// Axis for a column index, if any
    pub fn from_index(index: usize) -> Option<Axis> {
        Axis::ALL.get(index).copied()
    }

    /// The following axis, wrapping Z back to X
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Flag with only this axis set
    pub fn flag(self) -> AxisFlags {
        match self {
            Axis::X => AxisFlags::X,
            Axis::Y => AxisFlags::Y,
            Axis::Z => AxisFlags::Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.flag(), f)
    }
}

/// One of the three cardinal planes, indexed by its normal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum Plane {
    /// Plane spanned by Y and Z (normal X)
    YZ = 0,
    /// Plane spanned by Z and X (normal Y)
    ZX = 1,
    /// Plane spanned by X and Y (normal Z)
    XY = 2,
}

impl Plane {
    /// All planes in index order
    pub const ALL: [Plane; 3] = [Plane::YZ, Plane::ZX, Plane::XY];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Plane for a normal-axis index, if any
    pub fn from_index(index: usize) -> Option<Plane> {
        Plane::ALL.get(index).copied()
    }

    /// Axis perpendicular to the plane
    pub fn normal_axis(self) -> Axis {
        match self {
            Plane::YZ => Axis::X,
            Plane::ZX => Axis::Y,
            Plane::XY => Axis::Z,
        }
    }

    /// The two in-plane axes, in cyclic order after the normal axis
    pub fn axes(self) -> (Axis, Axis) {
        let normal = self.normal_axis();
        (normal.next(), normal.next().next())
    }

    /// Flags of both in-plane axes
    pub fn flags(self) -> AxisFlags {
        let (first, second) = self.axes();
        first.flag() | second.flag()
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.flags(), f)
    }
}

bitflags! {
    /// Set of axes a widget element touches
    ///
    /// Hover results, the axes captured for a drag, and caller-supplied locks
    /// all use this type. Empty means "nothing".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AxisFlags: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;

        const YZ = Self::Y.bits() | Self::Z.bits();
        const ZX = Self::Z.bits() | Self::X.bits();
        const XY = Self::X.bits() | Self::Y.bits();
        /// Screen-space move, uniform scale or free rotation
        const ALL = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl AxisFlags {
    /// Exactly one axis set
    pub fn is_single_axis(self) -> bool {
        self.bits().count_ones() == 1 && AxisFlags::ALL.contains(self)
    }

    /// Exactly two axes set
    pub fn is_plane(self) -> bool {
        self == AxisFlags::YZ || self == AxisFlags::ZX || self == AxisFlags::XY
    }

    /// The axis when exactly one is set
    pub fn single_axis(self) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.flag() == self)
    }

    /// The plane when exactly two axes are set
    pub fn plane(self) -> Option<Plane> {
        Plane::ALL.into_iter().find(|plane| plane.flags() == self)
    }

    /// Iterate over the axes contained in the set
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL
            .into_iter()
            .filter(move |axis| self.contains(axis.flag()))
    }
}

impl fmt::Display for AxisFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        if let Some(plane) = self.plane() {
            return f.write_str(match plane {
                Plane::YZ => "YZ",
                Plane::ZX => "ZX",
                Plane::XY => "XY",
            });
        }
        for axis in self.axes() {
            f.write_str(match axis {
                Axis::X => "X",
                Axis::Y => "Y",
                Axis::Z => "Z",
            })?;
        }
        Ok(())
    }
}

bitflags! {
    /// Behaviour switches for a context
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConfigFlags: u32 {
        /// A secondary click during a drag restores the pre-drag matrix
        const HAS_REVERSING = 1 << 0;
    }
}

/// NDC depth range of the caller's projection matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipDepth {
    /// Direct3D / Vulkan / wgpu convention (`glam::Mat4::perspective_rh`)
    #[default]
    ZeroToOne,
    /// OpenGL convention (`glam::Mat4::perspective_rh_gl`)
    NegativeOneToOne,
}

impl ClipDepth {
    /// NDC depth of the near plane
    pub fn near(self) -> f32 {
        match self {
            ClipDepth::ZeroToOne => 0.0,
            ClipDepth::NegativeOneToOne => -1.0,
        }
    }
}

/// Rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Get the right edge coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Check if a point is inside the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Width over height, `1.0` for a degenerate rectangle
    pub fn aspect_ratio(&self) -> f32 {
        if self.height.abs() > EPSILON {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Whether the rectangle has no usable area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Caller-chosen identity of a widget instance
///
/// Stable across frames; two widgets edited in the same frame must use
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Hash a label into an id (FNV-1a)
    pub fn from_label(label: &str) -> Self {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;
        let hash = label
            .bytes()
            .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME));
        Self(hash)
    }
}

impl From<u64> for WidgetId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for WidgetId {
    fn from(value: u32) -> Self {
        Self(u64::from(value))
    }
}

impl From<usize> for WidgetId {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<&str> for WidgetId {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:016x}", self.0)
    }
}
