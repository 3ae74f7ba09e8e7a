use crate::{
    callbacks::{ArchiveCallback, ArchiveKind, ErrorHandlerKind, FilterFunc, ProcSubdivFunc},
    counts::{CurveType, PatchType, Wrap},
    params::{NamedParameterList, ParameterList},
    types::{LightId, ObjectId, RtBasis, RtBound, RtMatrix, RtPoint},
};

/// Stable identification of every interface procedure. The display form is
/// the protocol's request name; the discriminant is a stable integer tag for
/// external dispatch tables.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[repr(u16)]
pub enum RequestId {
    ErrorHandler,
    Declare,
    FrameBegin,
    FrameEnd,
    WorldBegin,
    WorldEnd,
    AttributeBegin,
    AttributeEnd,
    TransformBegin,
    TransformEnd,
    SolidBegin,
    SolidEnd,
    ObjectBegin,
    ObjectEnd,
    ObjectInstance,
    MotionBegin,
    MotionEnd,
    Format,
    FrameAspectRatio,
    ScreenWindow,
    CropWindow,
    Projection,
    Clipping,
    ClippingPlane,
    DepthOfField,
    Shutter,
    PixelVariance,
    PixelSamples,
    PixelFilter,
    Exposure,
    Imager,
    Quantize,
    Display,
    DisplayChannel,
    Hider,
    ColorSamples,
    RelativeDetail,
    Option,
    LightSource,
    AreaLightSource,
    Illuminate,
    Attribute,
    Color,
    Opacity,
    Surface,
    Atmosphere,
    Interior,
    Exterior,
    Displacement,
    Deformation,
    TextureCoordinates,
    ShadingRate,
    ShadingInterpolation,
    Matte,
    Bound,
    Detail,
    DetailRange,
    GeometricApproximation,
    GeometricRepresentation,
    Orientation,
    ReverseOrientation,
    Sides,
    Identity,
    Transform,
    ConcatTransform,
    Perspective,
    Translate,
    Rotate,
    Scale,
    Skew,
    CoordinateSystem,
    CoordSysTransform,
    Polygon,
    GeneralPolygon,
    PointsPolygons,
    PointsGeneralPolygons,
    Basis,
    Patch,
    PatchMesh,
    NuPatch,
    TrimCurve,
    Sphere,
    Cone,
    Cylinder,
    Hyperboloid,
    Paraboloid,
    Disk,
    Torus,
    Points,
    Curves,
    Blobby,
    Procedural,
    Geometry,
    SubdivisionMesh,
    MakeTexture,
    MakeBump,
    MakeLatLongEnvironment,
    MakeCubeFaceEnvironment,
    MakeShadow,
    ArchiveRecord,
    ReadArchive,
}

impl RequestId {
    /// Stable integer tag.
    pub fn index(self) -> u16 {
        self as u16
    }

    /// The protocol request name.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// One recorded interface procedure invocation: the procedure's fixed
/// arguments, in protocol order, plus its bound parameter tail where the
/// procedure takes one. Shader-like procedures carry their name inside a
/// [`NamedParameterList`].
#[derive(Clone, Debug)]
pub enum Request {
    ErrorHandler {
        handler: ErrorHandlerKind,
    },
    Declare {
        name: String,
        declaration: String,
    },
    FrameBegin {
        frame: i32,
    },
    FrameEnd,
    WorldBegin,
    WorldEnd,
    AttributeBegin,
    AttributeEnd,
    TransformBegin,
    TransformEnd,
    SolidBegin {
        operation: String,
    },
    SolidEnd,
    ObjectBegin {
        slot: ObjectId,
    },
    ObjectEnd,
    ObjectInstance {
        slot: ObjectId,
    },
    MotionBegin {
        times: Vec<f32>,
    },
    MotionEnd,
    Format {
        xres: i32,
        yres: i32,
        aspect: f32,
    },
    FrameAspectRatio {
        aspect: f32,
    },
    ScreenWindow {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    },
    CropWindow {
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
    },
    Projection {
        params: NamedParameterList,
    },
    Clipping {
        near: f32,
        far: f32,
    },
    ClippingPlane {
        x: f32,
        y: f32,
        z: f32,
        nx: f32,
        ny: f32,
        nz: f32,
    },
    DepthOfField {
        fstop: f32,
        focal_length: f32,
        focal_distance: f32,
    },
    Shutter {
        open: f32,
        close: f32,
    },
    PixelVariance {
        variance: f32,
    },
    PixelSamples {
        xsamples: f32,
        ysamples: f32,
    },
    PixelFilter {
        func: FilterFunc,
        xwidth: f32,
        ywidth: f32,
    },
    Exposure {
        gain: f32,
        gamma: f32,
    },
    Imager {
        params: NamedParameterList,
    },
    Quantize {
        kind: String,
        one: i32,
        min: i32,
        max: i32,
        dither: f32,
    },
    Display {
        kind: String,
        mode: String,
        params: NamedParameterList,
    },
    DisplayChannel {
        params: NamedParameterList,
    },
    Hider {
        params: NamedParameterList,
    },
    ColorSamples {
        n_rgb: Vec<f32>,
        rgb_n: Vec<f32>,
    },
    RelativeDetail {
        relative_detail: f32,
    },
    Option {
        params: NamedParameterList,
    },
    LightSource {
        slot: LightId,
        params: NamedParameterList,
    },
    AreaLightSource {
        slot: LightId,
        params: NamedParameterList,
    },
    Illuminate {
        slot: LightId,
        on: bool,
    },
    Attribute {
        params: NamedParameterList,
    },
    Color {
        color: Vec<f32>,
    },
    Opacity {
        opacity: Vec<f32>,
    },
    Surface {
        params: NamedParameterList,
    },
    Atmosphere {
        params: NamedParameterList,
    },
    Interior {
        params: NamedParameterList,
    },
    Exterior {
        params: NamedParameterList,
    },
    Displacement {
        params: NamedParameterList,
    },
    Deformation {
        params: NamedParameterList,
    },
    TextureCoordinates {
        s1: f32,
        t1: f32,
        s2: f32,
        t2: f32,
        s3: f32,
        t3: f32,
        s4: f32,
        t4: f32,
    },
    ShadingRate {
        size: f32,
    },
    ShadingInterpolation {
        kind: String,
    },
    Matte {
        on: bool,
    },
    Bound {
        bound: RtBound,
    },
    Detail {
        bound: RtBound,
    },
    DetailRange {
        min_visible: f32,
        lower_transition: f32,
        upper_transition: f32,
        max_visible: f32,
    },
    GeometricApproximation {
        kind: String,
        value: f32,
    },
    GeometricRepresentation {
        kind: String,
    },
    Orientation {
        orientation: String,
    },
    ReverseOrientation,
    Sides {
        nsides: i32,
    },
    Identity,
    Transform {
        matrix: RtMatrix,
    },
    ConcatTransform {
        matrix: RtMatrix,
    },
    Perspective {
        fov: f32,
    },
    Translate {
        dx: f32,
        dy: f32,
        dz: f32,
    },
    Rotate {
        angle: f32,
        dx: f32,
        dy: f32,
        dz: f32,
    },
    Scale {
        dx: f32,
        dy: f32,
        dz: f32,
    },
    Skew {
        angle: f32,
        dx1: f32,
        dy1: f32,
        dz1: f32,
        dx2: f32,
        dy2: f32,
        dz2: f32,
    },
    CoordinateSystem {
        name: String,
    },
    CoordSysTransform {
        name: String,
    },
    Polygon {
        nvertices: i32,
        params: ParameterList,
    },
    GeneralPolygon {
        nverts: Vec<i32>,
        params: ParameterList,
    },
    PointsPolygons {
        nverts: Vec<i32>,
        verts: Vec<i32>,
        params: ParameterList,
    },
    PointsGeneralPolygons {
        nloops: Vec<i32>,
        nverts: Vec<i32>,
        verts: Vec<i32>,
        params: ParameterList,
    },
    Basis {
        ubasis: RtBasis,
        ustep: i32,
        vbasis: RtBasis,
        vstep: i32,
    },
    Patch {
        kind: PatchType,
        params: ParameterList,
    },
    PatchMesh {
        kind: PatchType,
        nu: i32,
        uwrap: Wrap,
        nv: i32,
        vwrap: Wrap,
        params: ParameterList,
    },
    NuPatch {
        nu: i32,
        uorder: i32,
        uknot: Vec<f32>,
        umin: f32,
        umax: f32,
        nv: i32,
        vorder: i32,
        vknot: Vec<f32>,
        vmin: f32,
        vmax: f32,
        params: ParameterList,
    },
    TrimCurve {
        ncurves: Vec<i32>,
        order: Vec<i32>,
        knot: Vec<f32>,
        min: Vec<f32>,
        max: Vec<f32>,
        n: Vec<i32>,
        u: Vec<f32>,
        v: Vec<f32>,
        w: Vec<f32>,
    },
    Sphere {
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Cone {
        height: f32,
        radius: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Cylinder {
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Hyperboloid {
        point1: RtPoint,
        point2: RtPoint,
        thetamax: f32,
        params: ParameterList,
    },
    Paraboloid {
        rmax: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Disk {
        height: f32,
        radius: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Torus {
        major_radius: f32,
        minor_radius: f32,
        phimin: f32,
        phimax: f32,
        thetamax: f32,
        params: ParameterList,
    },
    Points {
        npoints: i32,
        params: ParameterList,
    },
    Curves {
        kind: CurveType,
        nvertices: Vec<i32>,
        wrap: Wrap,
        params: ParameterList,
    },
    Blobby {
        nleaf: i32,
        code: Vec<i32>,
        floats: Vec<f32>,
        strings: Vec<String>,
        params: ParameterList,
    },
    Procedural {
        data: Vec<String>,
        bound: RtBound,
        func: ProcSubdivFunc,
    },
    Geometry {
        params: NamedParameterList,
    },
    SubdivisionMesh {
        scheme: String,
        nvertices: Vec<i32>,
        vertices: Vec<i32>,
        tags: Vec<String>,
        nargs: Vec<i32>,
        int_args: Vec<i32>,
        float_args: Vec<f32>,
        params: ParameterList,
    },
    MakeTexture {
        picture: String,
        texture: String,
        swrap: String,
        twrap: String,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParameterList,
    },
    MakeBump {
        picture: String,
        texture: String,
        swrap: String,
        twrap: String,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParameterList,
    },
    MakeLatLongEnvironment {
        picture: String,
        texture: String,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParameterList,
    },
    MakeCubeFaceEnvironment {
        px: String,
        nx: String,
        py: String,
        ny: String,
        pz: String,
        nz: String,
        texture: String,
        fov: f32,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParameterList,
    },
    MakeShadow {
        picture: String,
        texture: String,
        params: ParameterList,
    },
    ArchiveRecord {
        kind: ArchiveKind,
        record: String,
    },
    ReadArchive {
        callback: Option<ArchiveCallback>,
        params: NamedParameterList,
    },
}

impl Request {
    pub fn id(&self) -> RequestId {
        match self {
            Self::ErrorHandler { .. } => RequestId::ErrorHandler,
            Self::Declare { .. } => RequestId::Declare,
            Self::FrameBegin { .. } => RequestId::FrameBegin,
            Self::FrameEnd => RequestId::FrameEnd,
            Self::WorldBegin => RequestId::WorldBegin,
            Self::WorldEnd => RequestId::WorldEnd,
            Self::AttributeBegin => RequestId::AttributeBegin,
            Self::AttributeEnd => RequestId::AttributeEnd,
            Self::TransformBegin => RequestId::TransformBegin,
            Self::TransformEnd => RequestId::TransformEnd,
            Self::SolidBegin { .. } => RequestId::SolidBegin,
            Self::SolidEnd => RequestId::SolidEnd,
            Self::ObjectBegin { .. } => RequestId::ObjectBegin,
            Self::ObjectEnd => RequestId::ObjectEnd,
            Self::ObjectInstance { .. } => RequestId::ObjectInstance,
            Self::MotionBegin { .. } => RequestId::MotionBegin,
            Self::MotionEnd => RequestId::MotionEnd,
            Self::Format { .. } => RequestId::Format,
            Self::FrameAspectRatio { .. } => RequestId::FrameAspectRatio,
            Self::ScreenWindow { .. } => RequestId::ScreenWindow,
            Self::CropWindow { .. } => RequestId::CropWindow,
            Self::Projection { .. } => RequestId::Projection,
            Self::Clipping { .. } => RequestId::Clipping,
            Self::ClippingPlane { .. } => RequestId::ClippingPlane,
            Self::DepthOfField { .. } => RequestId::DepthOfField,
            Self::Shutter { .. } => RequestId::Shutter,
            Self::PixelVariance { .. } => RequestId::PixelVariance,
            Self::PixelSamples { .. } => RequestId::PixelSamples,
            Self::PixelFilter { .. } => RequestId::PixelFilter,
            Self::Exposure { .. } => RequestId::Exposure,
            Self::Imager { .. } => RequestId::Imager,
            Self::Quantize { .. } => RequestId::Quantize,
            Self::Display { .. } => RequestId::Display,
            Self::DisplayChannel { .. } => RequestId::DisplayChannel,
            Self::Hider { .. } => RequestId::Hider,
            Self::ColorSamples { .. } => RequestId::ColorSamples,
            Self::RelativeDetail { .. } => RequestId::RelativeDetail,
            Self::Option { .. } => RequestId::Option,
            Self::LightSource { .. } => RequestId::LightSource,
            Self::AreaLightSource { .. } => RequestId::AreaLightSource,
            Self::Illuminate { .. } => RequestId::Illuminate,
            Self::Attribute { .. } => RequestId::Attribute,
            Self::Color { .. } => RequestId::Color,
            Self::Opacity { .. } => RequestId::Opacity,
            Self::Surface { .. } => RequestId::Surface,
            Self::Atmosphere { .. } => RequestId::Atmosphere,
            Self::Interior { .. } => RequestId::Interior,
            Self::Exterior { .. } => RequestId::Exterior,
            Self::Displacement { .. } => RequestId::Displacement,
            Self::Deformation { .. } => RequestId::Deformation,
            Self::TextureCoordinates { .. } => RequestId::TextureCoordinates,
            Self::ShadingRate { .. } => RequestId::ShadingRate,
            Self::ShadingInterpolation { .. } => RequestId::ShadingInterpolation,
            Self::Matte { .. } => RequestId::Matte,
            Self::Bound { .. } => RequestId::Bound,
            Self::Detail { .. } => RequestId::Detail,
            Self::DetailRange { .. } => RequestId::DetailRange,
            Self::GeometricApproximation { .. } => RequestId::GeometricApproximation,
            Self::GeometricRepresentation { .. } => RequestId::GeometricRepresentation,
            Self::Orientation { .. } => RequestId::Orientation,
            Self::ReverseOrientation => RequestId::ReverseOrientation,
            Self::Sides { .. } => RequestId::Sides,
            Self::Identity => RequestId::Identity,
            Self::Transform { .. } => RequestId::Transform,
            Self::ConcatTransform { .. } => RequestId::ConcatTransform,
            Self::Perspective { .. } => RequestId::Perspective,
            Self::Translate { .. } => RequestId::Translate,
            Self::Rotate { .. } => RequestId::Rotate,
            Self::Scale { .. } => RequestId::Scale,
            Self::Skew { .. } => RequestId::Skew,
            Self::CoordinateSystem { .. } => RequestId::CoordinateSystem,
            Self::CoordSysTransform { .. } => RequestId::CoordSysTransform,
            Self::Polygon { .. } => RequestId::Polygon,
            Self::GeneralPolygon { .. } => RequestId::GeneralPolygon,
            Self::PointsPolygons { .. } => RequestId::PointsPolygons,
            Self::PointsGeneralPolygons { .. } => RequestId::PointsGeneralPolygons,
            Self::Basis { .. } => RequestId::Basis,
            Self::Patch { .. } => RequestId::Patch,
            Self::PatchMesh { .. } => RequestId::PatchMesh,
            Self::NuPatch { .. } => RequestId::NuPatch,
            Self::TrimCurve { .. } => RequestId::TrimCurve,
            Self::Sphere { .. } => RequestId::Sphere,
            Self::Cone { .. } => RequestId::Cone,
            Self::Cylinder { .. } => RequestId::Cylinder,
            Self::Hyperboloid { .. } => RequestId::Hyperboloid,
            Self::Paraboloid { .. } => RequestId::Paraboloid,
            Self::Disk { .. } => RequestId::Disk,
            Self::Torus { .. } => RequestId::Torus,
            Self::Points { .. } => RequestId::Points,
            Self::Curves { .. } => RequestId::Curves,
            Self::Blobby { .. } => RequestId::Blobby,
            Self::Procedural { .. } => RequestId::Procedural,
            Self::Geometry { .. } => RequestId::Geometry,
            Self::SubdivisionMesh { .. } => RequestId::SubdivisionMesh,
            Self::MakeTexture { .. } => RequestId::MakeTexture,
            Self::MakeBump { .. } => RequestId::MakeBump,
            Self::MakeLatLongEnvironment { .. } => RequestId::MakeLatLongEnvironment,
            Self::MakeCubeFaceEnvironment { .. } => RequestId::MakeCubeFaceEnvironment,
            Self::MakeShadow { .. } => RequestId::MakeShadow,
            Self::ArchiveRecord { .. } => RequestId::ArchiveRecord,
            Self::ReadArchive { .. } => RequestId::ReadArchive,
        }
    }

    /// The request's variable parameter tail, if the procedure takes one.
    pub fn params(&self) -> Option<&ParameterList> {
        match self {
            Self::Polygon { params, .. }
            | Self::GeneralPolygon { params, .. }
            | Self::PointsPolygons { params, .. }
            | Self::PointsGeneralPolygons { params, .. }
            | Self::Patch { params, .. }
            | Self::PatchMesh { params, .. }
            | Self::NuPatch { params, .. }
            | Self::Sphere { params, .. }
            | Self::Cone { params, .. }
            | Self::Cylinder { params, .. }
            | Self::Hyperboloid { params, .. }
            | Self::Paraboloid { params, .. }
            | Self::Disk { params, .. }
            | Self::Torus { params, .. }
            | Self::Points { params, .. }
            | Self::Curves { params, .. }
            | Self::Blobby { params, .. }
            | Self::SubdivisionMesh { params, .. }
            | Self::MakeTexture { params, .. }
            | Self::MakeBump { params, .. }
            | Self::MakeLatLongEnvironment { params, .. }
            | Self::MakeCubeFaceEnvironment { params, .. }
            | Self::MakeShadow { params, .. } => Some(params),
            Self::Projection { params }
            | Self::Imager { params }
            | Self::Display { params, .. }
            | Self::DisplayChannel { params }
            | Self::Hider { params }
            | Self::Option { params }
            | Self::LightSource { params, .. }
            | Self::AreaLightSource { params, .. }
            | Self::Attribute { params }
            | Self::Surface { params }
            | Self::Atmosphere { params }
            | Self::Interior { params }
            | Self::Exterior { params }
            | Self::Displacement { params }
            | Self::Deformation { params }
            | Self::Geometry { params }
            | Self::ReadArchive { params, .. } => Some(params.params()),
            _ => None,
        }
    }
}

/// One recorded call: the request plus the source line it was recorded from
/// (`None` when unknown). Line numbers are diagnostic only; they are never
/// passed to the backend.
#[derive(Clone, Debug)]
pub struct Call {
    line: Option<u32>,
    request: Request,
}

impl Call {
    pub fn new(line: Option<u32>, request: Request) -> Self {
        Self { line, request }
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn id(&self) -> RequestId {
        self.request.id()
    }

    pub fn name(&self) -> &'static str {
        self.id().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_are_stable_and_distinct() {
        let ids: Vec<u16> = RequestId::iter().map(RequestId::index).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert_eq!(RequestId::ErrorHandler.index(), 0);
    }

    #[test]
    fn names_are_protocol_request_names() {
        assert_eq!(RequestId::Sphere.name(), "Sphere");
        assert_eq!(RequestId::ReadArchive.name(), "ReadArchive");
        assert_eq!(RequestId::PatchMesh.name(), "PatchMesh");
        assert_eq!(RequestId::Option.name(), "Option");
    }

    #[test]
    fn call_keeps_line_and_id() {
        let call = Call::new(Some(12), Request::WorldBegin);
        assert_eq!(call.line(), Some(12));
        assert_eq!(call.id(), RequestId::WorldBegin);
        assert_eq!(call.name(), "WorldBegin");

        let unknown = Call::new(None, Request::WorldEnd);
        assert_eq!(unknown.line(), None);
    }
}
