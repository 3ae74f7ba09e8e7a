//! Scalar and aggregate types fixed by the scene-description interface.

/// Row-major 4x4 transformation matrix.
pub type RtMatrix = [[f32; 4]; 4];

/// Spline basis matrix.
pub type RtBasis = [[f32; 4]; 4];

/// Axis-aligned bound: xmin, xmax, ymin, ymax, zmin, zmax.
pub type RtBound = [f32; 6];

/// 3D point, used by the fixed arguments of a few requests.
pub type RtPoint = [f32; 3];

pub const IDENTITY_MATRIX: RtMatrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub const BEZIER_BASIS: RtBasis = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];
pub const BEZIER_STEP: i32 = 3;

pub const B_SPLINE_BASIS: RtBasis = [
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
    [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
];
pub const B_SPLINE_STEP: i32 = 1;

pub const CATMULL_ROM_BASIS: RtBasis = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];
pub const CATMULL_ROM_STEP: i32 = 1;

pub const HERMITE_BASIS: RtBasis = [
    [2.0, 1.0, -2.0, 1.0],
    [-3.0, -2.0, 3.0, -1.0],
    [0.0, 1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];
pub const HERMITE_STEP: i32 = 2;

pub const POWER_BASIS: RtBasis = IDENTITY_MATRIX;
pub const POWER_STEP: i32 = 4;

/// Recorder-assigned slot for a light created during recording. Bound to a
/// backend [`LightHandle`] when the creating call replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(pub u32);

/// Recorder-assigned slot for a retained object definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u32);

/// Backend-owned handle returned by light creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightHandle(pub u32);

/// Backend-owned handle returned by `object_begin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);
