use crate::{
    callbacks::{ArchiveCallback, ArchiveKind, ErrorHandlerKind, FilterFunc, ProcSubdivFunc},
    counts::{CurveType, PatchType, ValueCounts, Wrap},
    declaration::{ColorDescr, DeclarationDictionary},
    error::{RibandError, RibandResult},
    params::{NamedParameterList, ParameterList},
    request::{Call, Request},
    types::{BEZIER_STEP, LightId, ObjectId, RtBasis, RtBound, RtMatrix, RtPoint},
    value::TokenData,
};

/// The construction seam: one method per interface procedure, each binding
/// the call's parameter tail against the recorder's dictionary and color
/// descriptor and returning the finished [`Call`].
///
/// The recorder owns the cross-call state the protocol requires: the active
/// color descriptor (`color_samples`), the current basis steps (`basis`,
/// consumed by patch-mesh and curve counts), registered declarations
/// (`declare`), monotonic light/object slot allocation, and the current
/// source line for diagnostics.
#[derive(Clone, Debug)]
pub struct Recorder {
    dict: DeclarationDictionary,
    colors: ColorDescr,
    ustep: i32,
    vstep: i32,
    next_light: u32,
    next_object: u32,
    line: Option<u32>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            dict: DeclarationDictionary::with_standard(),
            colors: ColorDescr::default(),
            ustep: BEZIER_STEP,
            vstep: BEZIER_STEP,
            next_light: 0,
            next_object: 0,
            line: None,
        }
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source line stamped onto subsequently constructed calls.
    pub fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }

    pub fn clear_line(&mut self) {
        self.line = None;
    }

    pub fn dictionary(&self) -> &DeclarationDictionary {
        &self.dict
    }

    pub fn color_descr(&self) -> &ColorDescr {
        &self.colors
    }

    pub fn basis_steps(&self) -> (i32, i32) {
        (self.ustep, self.vstep)
    }

    fn finish(&self, request: Request) -> Call {
        let call = Call::new(self.line, request);
        tracing::trace!(request = call.name(), line = call.line(), "record");
        call
    }

    fn list(&self, counts: &ValueCounts, items: &[TokenData<'_>]) -> RibandResult<ParameterList> {
        ParameterList::bind(counts, &self.dict, &self.colors, items)
    }

    fn named(
        &self,
        name: &str,
        counts: &ValueCounts,
        items: &[TokenData<'_>],
    ) -> RibandResult<NamedParameterList> {
        NamedParameterList::bind(name, counts, &self.dict, &self.colors, items)
    }

    fn named_singles(
        &self,
        name: &str,
        items: &[TokenData<'_>],
    ) -> RibandResult<NamedParameterList> {
        self.named(name, &ValueCounts::singles(), items)
    }

    /// Copies one value per channel of the active color descriptor.
    fn color_values(&self, what: &str, values: &[f32]) -> RibandResult<Vec<f32>> {
        if values.len() < self.colors.samples {
            return Err(RibandError::missing_data(format!(
                "{what} expects {} channel values, got {}",
                self.colors.samples,
                values.len()
            )));
        }
        Ok(values[..self.colors.samples].to_vec())
    }

    // ---- error handling and declarations ------------------------------

    pub fn error_handler(&self, handler: ErrorHandlerKind) -> RibandResult<Call> {
        Ok(self.finish(Request::ErrorHandler { handler }))
    }

    /// Registers the declaration for every later call and records it for
    /// replay.
    pub fn declare(&mut self, name: &str, declaration: &str) -> RibandResult<Call> {
        self.dict.declare(name, declaration)?;
        Ok(self.finish(Request::Declare {
            name: name.to_string(),
            declaration: declaration.to_string(),
        }))
    }

    // ---- mode blocks --------------------------------------------------

    pub fn frame_begin(&self, frame: i32) -> RibandResult<Call> {
        Ok(self.finish(Request::FrameBegin { frame }))
    }

    pub fn frame_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::FrameEnd))
    }

    pub fn world_begin(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::WorldBegin))
    }

    pub fn world_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::WorldEnd))
    }

    pub fn attribute_begin(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::AttributeBegin))
    }

    pub fn attribute_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::AttributeEnd))
    }

    pub fn transform_begin(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::TransformBegin))
    }

    pub fn transform_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::TransformEnd))
    }

    pub fn solid_begin(&self, operation: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::SolidBegin {
            operation: operation.to_string(),
        }))
    }

    pub fn solid_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::SolidEnd))
    }

    /// Allocates the slot later bound to the backend's object handle; the
    /// caller keeps the [`ObjectId`] to instance the object.
    pub fn object_begin(&mut self) -> RibandResult<(Call, ObjectId)> {
        let slot = ObjectId(self.next_object);
        self.next_object += 1;
        Ok((self.finish(Request::ObjectBegin { slot }), slot))
    }

    pub fn object_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::ObjectEnd))
    }

    pub fn object_instance(&self, slot: ObjectId) -> RibandResult<Call> {
        Ok(self.finish(Request::ObjectInstance { slot }))
    }

    pub fn motion_begin(&self, times: &[f32]) -> RibandResult<Call> {
        Ok(self.finish(Request::MotionBegin {
            times: times.to_vec(),
        }))
    }

    pub fn motion_end(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::MotionEnd))
    }

    // ---- camera and display options -----------------------------------

    pub fn format(&self, xres: i32, yres: i32, aspect: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Format { xres, yres, aspect }))
    }

    pub fn frame_aspect_ratio(&self, aspect: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::FrameAspectRatio { aspect }))
    }

    pub fn screen_window(
        &self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::ScreenWindow {
            left,
            right,
            bottom,
            top,
        }))
    }

    pub fn crop_window(&self, xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::CropWindow {
            xmin,
            xmax,
            ymin,
            ymax,
        }))
    }

    pub fn projection(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Projection {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn clipping(&self, near: f32, far: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Clipping { near, far }))
    }

    pub fn clipping_plane(
        &self,
        x: f32,
        y: f32,
        z: f32,
        nx: f32,
        ny: f32,
        nz: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::ClippingPlane {
            x,
            y,
            z,
            nx,
            ny,
            nz,
        }))
    }

    pub fn depth_of_field(
        &self,
        fstop: f32,
        focal_length: f32,
        focal_distance: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::DepthOfField {
            fstop,
            focal_length,
            focal_distance,
        }))
    }

    pub fn shutter(&self, open: f32, close: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Shutter { open, close }))
    }

    pub fn pixel_variance(&self, variance: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::PixelVariance { variance }))
    }

    pub fn pixel_samples(&self, xsamples: f32, ysamples: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::PixelSamples { xsamples, ysamples }))
    }

    pub fn pixel_filter(&self, func: FilterFunc, xwidth: f32, ywidth: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::PixelFilter {
            func,
            xwidth,
            ywidth,
        }))
    }

    pub fn exposure(&self, gain: f32, gamma: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Exposure { gain, gamma }))
    }

    pub fn imager(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Imager {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn quantize(
        &self,
        kind: &str,
        one: i32,
        min: i32,
        max: i32,
        dither: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Quantize {
            kind: kind.to_string(),
            one,
            min,
            max,
            dither,
        }))
    }

    pub fn display(
        &self,
        name: &str,
        kind: &str,
        mode: &str,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Display {
            kind: kind.to_string(),
            mode: mode.to_string(),
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn display_channel(&self, channel: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::DisplayChannel {
            params: self.named_singles(channel, items)?,
        }))
    }

    pub fn hider(&self, kind: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Hider {
            params: self.named_singles(kind, items)?,
        }))
    }

    /// Installs a new color descriptor; every later color parameter and
    /// `color`/`opacity` call decodes under it.
    pub fn color_samples(&mut self, n_rgb: &[f32], rgb_n: &[f32]) -> RibandResult<Call> {
        self.colors = ColorDescr::new(n_rgb, rgb_n)?;
        Ok(self.finish(Request::ColorSamples {
            n_rgb: n_rgb.to_vec(),
            rgb_n: rgb_n.to_vec(),
        }))
    }

    pub fn relative_detail(&self, relative_detail: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::RelativeDetail { relative_detail }))
    }

    pub fn option(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Option {
            params: self.named_singles(name, items)?,
        }))
    }

    // ---- lights -------------------------------------------------------

    pub fn light_source(
        &mut self,
        name: &str,
        items: &[TokenData<'_>],
    ) -> RibandResult<(Call, LightId)> {
        let params = self.named_singles(name, items)?;
        let slot = LightId(self.next_light);
        self.next_light += 1;
        Ok((self.finish(Request::LightSource { slot, params }), slot))
    }

    pub fn area_light_source(
        &mut self,
        name: &str,
        items: &[TokenData<'_>],
    ) -> RibandResult<(Call, LightId)> {
        let params = self.named_singles(name, items)?;
        let slot = LightId(self.next_light);
        self.next_light += 1;
        Ok((self.finish(Request::AreaLightSource { slot, params }), slot))
    }

    pub fn illuminate(&self, slot: LightId, on: bool) -> RibandResult<Call> {
        Ok(self.finish(Request::Illuminate { slot, on }))
    }

    // ---- attributes and shaders ---------------------------------------

    pub fn attribute(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Attribute {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn color(&self, color: &[f32]) -> RibandResult<Call> {
        Ok(self.finish(Request::Color {
            color: self.color_values("Color", color)?,
        }))
    }

    pub fn opacity(&self, opacity: &[f32]) -> RibandResult<Call> {
        Ok(self.finish(Request::Opacity {
            opacity: self.color_values("Opacity", opacity)?,
        }))
    }

    pub fn surface(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Surface {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn atmosphere(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Atmosphere {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn interior(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Interior {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn exterior(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Exterior {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn displacement(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Displacement {
            params: self.named_singles(name, items)?,
        }))
    }

    pub fn deformation(&self, name: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Deformation {
            params: self.named_singles(name, items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn texture_coordinates(
        &self,
        s1: f32,
        t1: f32,
        s2: f32,
        t2: f32,
        s3: f32,
        t3: f32,
        s4: f32,
        t4: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::TextureCoordinates {
            s1,
            t1,
            s2,
            t2,
            s3,
            t3,
            s4,
            t4,
        }))
    }

    pub fn shading_rate(&self, size: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::ShadingRate { size }))
    }

    pub fn shading_interpolation(&self, kind: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::ShadingInterpolation {
            kind: kind.to_string(),
        }))
    }

    pub fn matte(&self, on: bool) -> RibandResult<Call> {
        Ok(self.finish(Request::Matte { on }))
    }

    pub fn bound(&self, bound: RtBound) -> RibandResult<Call> {
        Ok(self.finish(Request::Bound { bound }))
    }

    pub fn detail(&self, bound: RtBound) -> RibandResult<Call> {
        Ok(self.finish(Request::Detail { bound }))
    }

    pub fn detail_range(
        &self,
        min_visible: f32,
        lower_transition: f32,
        upper_transition: f32,
        max_visible: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::DetailRange {
            min_visible,
            lower_transition,
            upper_transition,
            max_visible,
        }))
    }

    pub fn geometric_approximation(&self, kind: &str, value: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::GeometricApproximation {
            kind: kind.to_string(),
            value,
        }))
    }

    pub fn geometric_representation(&self, kind: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::GeometricRepresentation {
            kind: kind.to_string(),
        }))
    }

    pub fn orientation(&self, orientation: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::Orientation {
            orientation: orientation.to_string(),
        }))
    }

    pub fn reverse_orientation(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::ReverseOrientation))
    }

    pub fn sides(&self, nsides: i32) -> RibandResult<Call> {
        Ok(self.finish(Request::Sides { nsides }))
    }

    // ---- transformations ----------------------------------------------

    pub fn identity(&self) -> RibandResult<Call> {
        Ok(self.finish(Request::Identity))
    }

    pub fn transform(&self, matrix: RtMatrix) -> RibandResult<Call> {
        Ok(self.finish(Request::Transform { matrix }))
    }

    pub fn concat_transform(&self, matrix: RtMatrix) -> RibandResult<Call> {
        Ok(self.finish(Request::ConcatTransform { matrix }))
    }

    pub fn perspective(&self, fov: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Perspective { fov }))
    }

    pub fn translate(&self, dx: f32, dy: f32, dz: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Translate { dx, dy, dz }))
    }

    pub fn rotate(&self, angle: f32, dx: f32, dy: f32, dz: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Rotate { angle, dx, dy, dz }))
    }

    pub fn scale(&self, dx: f32, dy: f32, dz: f32) -> RibandResult<Call> {
        Ok(self.finish(Request::Scale { dx, dy, dz }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn skew(
        &self,
        angle: f32,
        dx1: f32,
        dy1: f32,
        dz1: f32,
        dx2: f32,
        dy2: f32,
        dz2: f32,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Skew {
            angle,
            dx1,
            dy1,
            dz1,
            dx2,
            dy2,
            dz2,
        }))
    }

    pub fn coordinate_system(&self, name: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::CoordinateSystem {
            name: name.to_string(),
        }))
    }

    pub fn coord_sys_transform(&self, name: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::CoordSysTransform {
            name: name.to_string(),
        }))
    }

    // ---- geometric primitives -----------------------------------------

    pub fn polygon(&self, nvertices: i32, items: &[TokenData<'_>]) -> RibandResult<Call> {
        let counts = ValueCounts::polygon(nvertices.max(0) as usize);
        Ok(self.finish(Request::Polygon {
            nvertices,
            params: self.list(&counts, items)?,
        }))
    }

    pub fn general_polygon(&self, nverts: &[i32], items: &[TokenData<'_>]) -> RibandResult<Call> {
        let counts = ValueCounts::general_polygon(nverts);
        Ok(self.finish(Request::GeneralPolygon {
            nverts: nverts.to_vec(),
            params: self.list(&counts, items)?,
        }))
    }

    pub fn points_polygons(
        &self,
        nverts: &[i32],
        verts: &[i32],
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        expect_len("PointsPolygons", "verts", verts.len(), sum(nverts))?;
        let counts = ValueCounts::points_polygons(nverts, verts);
        Ok(self.finish(Request::PointsPolygons {
            nverts: nverts.to_vec(),
            verts: verts.to_vec(),
            params: self.list(&counts, items)?,
        }))
    }

    pub fn points_general_polygons(
        &self,
        nloops: &[i32],
        nverts: &[i32],
        verts: &[i32],
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        expect_len("PointsGeneralPolygons", "nverts", nverts.len(), sum(nloops))?;
        expect_len("PointsGeneralPolygons", "verts", verts.len(), sum(nverts))?;
        let counts = ValueCounts::points_general_polygons(nloops, nverts, verts);
        Ok(self.finish(Request::PointsGeneralPolygons {
            nloops: nloops.to_vec(),
            nverts: nverts.to_vec(),
            verts: verts.to_vec(),
            params: self.list(&counts, items)?,
        }))
    }

    /// Records the basis and keeps the steps for later patch-mesh and curve
    /// counts.
    pub fn basis(
        &mut self,
        ubasis: RtBasis,
        ustep: i32,
        vbasis: RtBasis,
        vstep: i32,
    ) -> RibandResult<Call> {
        if ustep <= 0 || vstep <= 0 {
            return Err(RibandError::range(format!(
                "basis steps must be positive, got ({ustep}, {vstep})"
            )));
        }
        self.ustep = ustep;
        self.vstep = vstep;
        Ok(self.finish(Request::Basis {
            ubasis,
            ustep,
            vbasis,
            vstep,
        }))
    }

    pub fn patch(&self, kind: PatchType, items: &[TokenData<'_>]) -> RibandResult<Call> {
        let counts = ValueCounts::patch(kind);
        Ok(self.finish(Request::Patch {
            kind,
            params: self.list(&counts, items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn patch_mesh(
        &self,
        kind: PatchType,
        nu: i32,
        uwrap: Wrap,
        nv: i32,
        vwrap: Wrap,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        let counts = ValueCounts::patch_mesh(
            kind,
            nu.max(0) as usize,
            uwrap,
            nv.max(0) as usize,
            vwrap,
            self.ustep as usize,
            self.vstep as usize,
        );
        Ok(self.finish(Request::PatchMesh {
            kind,
            nu,
            uwrap,
            nv,
            vwrap,
            params: self.list(&counts, items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn nu_patch(
        &self,
        nu: i32,
        uorder: i32,
        uknot: &[f32],
        umin: f32,
        umax: f32,
        nv: i32,
        vorder: i32,
        vknot: &[f32],
        vmin: f32,
        vmax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        expect_len("NuPatch", "uknot", uknot.len(), (nu + uorder).max(0) as usize)?;
        expect_len("NuPatch", "vknot", vknot.len(), (nv + vorder).max(0) as usize)?;
        let counts = ValueCounts::nu_patch(
            nu.max(0) as usize,
            uorder.max(0) as usize,
            nv.max(0) as usize,
            vorder.max(0) as usize,
        );
        Ok(self.finish(Request::NuPatch {
            nu,
            uorder,
            uknot: uknot.to_vec(),
            umin,
            umax,
            nv,
            vorder,
            vknot: vknot.to_vec(),
            vmin,
            vmax,
            params: self.list(&counts, items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn trim_curve(
        &self,
        ncurves: &[i32],
        order: &[i32],
        knot: &[f32],
        min: &[f32],
        max: &[f32],
        n: &[i32],
        u: &[f32],
        v: &[f32],
        w: &[f32],
    ) -> RibandResult<Call> {
        let total = sum(ncurves);
        expect_len("TrimCurve", "order", order.len(), total)?;
        expect_len("TrimCurve", "min", min.len(), total)?;
        expect_len("TrimCurve", "max", max.len(), total)?;
        expect_len("TrimCurve", "n", n.len(), total)?;
        expect_len("TrimCurve", "knot", knot.len(), sum(order) + sum(n))?;
        let points = sum(n);
        expect_len("TrimCurve", "u", u.len(), points)?;
        expect_len("TrimCurve", "v", v.len(), points)?;
        expect_len("TrimCurve", "w", w.len(), points)?;
        Ok(self.finish(Request::TrimCurve {
            ncurves: ncurves.to_vec(),
            order: order.to_vec(),
            knot: knot.to_vec(),
            min: min.to_vec(),
            max: max.to_vec(),
            n: n.to_vec(),
            u: u.to_vec(),
            v: v.to_vec(),
            w: w.to_vec(),
        }))
    }

    pub fn sphere(
        &self,
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Sphere {
            radius,
            zmin,
            zmax,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn cone(
        &self,
        height: f32,
        radius: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Cone {
            height,
            radius,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn cylinder(
        &self,
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Cylinder {
            radius,
            zmin,
            zmax,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn hyperboloid(
        &self,
        point1: RtPoint,
        point2: RtPoint,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Hyperboloid {
            point1,
            point2,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn paraboloid(
        &self,
        rmax: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Paraboloid {
            rmax,
            zmin,
            zmax,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn disk(
        &self,
        height: f32,
        radius: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Disk {
            height,
            radius,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn torus(
        &self,
        major_radius: f32,
        minor_radius: f32,
        phimin: f32,
        phimax: f32,
        thetamax: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Torus {
            major_radius,
            minor_radius,
            phimin,
            phimax,
            thetamax,
            params: self.list(&ValueCounts::quadric(), items)?,
        }))
    }

    pub fn points(&self, npoints: i32, items: &[TokenData<'_>]) -> RibandResult<Call> {
        let counts = ValueCounts::points(npoints.max(0) as usize);
        Ok(self.finish(Request::Points {
            npoints,
            params: self.list(&counts, items)?,
        }))
    }

    pub fn curves(
        &self,
        kind: CurveType,
        nvertices: &[i32],
        wrap: Wrap,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        let counts = ValueCounts::curves(kind, nvertices, wrap, self.vstep as usize);
        Ok(self.finish(Request::Curves {
            kind,
            nvertices: nvertices.to_vec(),
            wrap,
            params: self.list(&counts, items)?,
        }))
    }

    pub fn blobby(
        &self,
        nleaf: i32,
        code: &[i32],
        floats: &[f32],
        strings: &[&str],
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        let counts = ValueCounts::blobby(nleaf.max(0) as usize);
        Ok(self.finish(Request::Blobby {
            nleaf,
            code: code.to_vec(),
            floats: floats.to_vec(),
            strings: strings.iter().map(|s| s.to_string()).collect(),
            params: self.list(&counts, items)?,
        }))
    }

    pub fn procedural(
        &self,
        data: &[&str],
        bound: RtBound,
        func: ProcSubdivFunc,
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::Procedural {
            data: data.iter().map(|s| s.to_string()).collect(),
            bound,
            func,
        }))
    }

    pub fn geometry(&self, kind: &str, items: &[TokenData<'_>]) -> RibandResult<Call> {
        Ok(self.finish(Request::Geometry {
            params: self.named_singles(kind, items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn subdivision_mesh(
        &self,
        scheme: &str,
        nvertices: &[i32],
        vertices: &[i32],
        tags: &[&str],
        nargs: &[i32],
        int_args: &[i32],
        float_args: &[f32],
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        expect_len("SubdivisionMesh", "vertices", vertices.len(), sum(nvertices))?;
        expect_len("SubdivisionMesh", "nargs", nargs.len(), tags.len() * 2)?;
        let ints: usize = nargs.iter().step_by(2).map(|&n| n.max(0) as usize).sum();
        let floats: usize = nargs
            .iter()
            .skip(1)
            .step_by(2)
            .map(|&n| n.max(0) as usize)
            .sum();
        expect_len("SubdivisionMesh", "intargs", int_args.len(), ints)?;
        expect_len("SubdivisionMesh", "floatargs", float_args.len(), floats)?;
        let counts = ValueCounts::subdivision_mesh(nvertices, vertices);
        Ok(self.finish(Request::SubdivisionMesh {
            scheme: scheme.to_string(),
            nvertices: nvertices.to_vec(),
            vertices: vertices.to_vec(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            nargs: nargs.to_vec(),
            int_args: int_args.to_vec(),
            float_args: float_args.to_vec(),
            params: self.list(&counts, items)?,
        }))
    }

    // ---- texture baking -----------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn make_texture(
        &self,
        picture: &str,
        texture: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::MakeTexture {
            picture: picture.to_string(),
            texture: texture.to_string(),
            swrap: swrap.to_string(),
            twrap: twrap.to_string(),
            filter,
            swidth,
            twidth,
            params: self.list(&ValueCounts::singles(), items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn make_bump(
        &self,
        picture: &str,
        texture: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::MakeBump {
            picture: picture.to_string(),
            texture: texture.to_string(),
            swrap: swrap.to_string(),
            twrap: twrap.to_string(),
            filter,
            swidth,
            twidth,
            params: self.list(&ValueCounts::singles(), items)?,
        }))
    }

    pub fn make_lat_long_environment(
        &self,
        picture: &str,
        texture: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::MakeLatLongEnvironment {
            picture: picture.to_string(),
            texture: texture.to_string(),
            filter,
            swidth,
            twidth,
            params: self.list(&ValueCounts::singles(), items)?,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn make_cube_face_environment(
        &self,
        px: &str,
        nx: &str,
        py: &str,
        ny: &str,
        pz: &str,
        nz: &str,
        texture: &str,
        fov: f32,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::MakeCubeFaceEnvironment {
            px: px.to_string(),
            nx: nx.to_string(),
            py: py.to_string(),
            ny: ny.to_string(),
            pz: pz.to_string(),
            nz: nz.to_string(),
            texture: texture.to_string(),
            fov,
            filter,
            swidth,
            twidth,
            params: self.list(&ValueCounts::singles(), items)?,
        }))
    }

    pub fn make_shadow(
        &self,
        picture: &str,
        texture: &str,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::MakeShadow {
            picture: picture.to_string(),
            texture: texture.to_string(),
            params: self.list(&ValueCounts::singles(), items)?,
        }))
    }

    // ---- archives -----------------------------------------------------

    pub fn archive_record(&self, kind: ArchiveKind, record: &str) -> RibandResult<Call> {
        Ok(self.finish(Request::ArchiveRecord {
            kind,
            record: record.to_string(),
        }))
    }

    pub fn read_archive(
        &self,
        name: &str,
        callback: Option<ArchiveCallback>,
        items: &[TokenData<'_>],
    ) -> RibandResult<Call> {
        Ok(self.finish(Request::ReadArchive {
            callback,
            params: self.named_singles(name, items)?,
        }))
    }
}

fn sum(counts: &[i32]) -> usize {
    counts.iter().map(|&n| n.max(0) as usize).sum()
}

fn expect_len(request: &str, what: &str, got: usize, want: usize) -> RibandResult<()> {
    if got != want {
        return Err(RibandError::consistency(format!(
            "{request}: {what} must hold {want} entries, got {got}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        request::RequestId,
        types::{B_SPLINE_BASIS, B_SPLINE_STEP},
        value::RawData,
    };

    #[test]
    fn line_is_stamped_on_calls() {
        let mut rec = Recorder::new();
        rec.set_line(42);
        let call = rec.world_begin().unwrap();
        assert_eq!(call.line(), Some(42));
        rec.clear_line();
        assert_eq!(rec.world_end().unwrap().line(), None);
    }

    #[test]
    fn declare_registers_for_later_calls() {
        let mut rec = Recorder::new();
        let call = rec.declare("temperature", "varying float").unwrap();
        assert_eq!(call.id(), RequestId::Declare);
        let poly = rec
            .polygon(
                3,
                &[
                    ("P", RawData::Floats(&[0.0; 9])),
                    ("temperature", RawData::Floats(&[0.5, 0.6, 0.7])),
                ],
            )
            .unwrap();
        let params = poly.request().params().unwrap();
        assert_eq!(params.get("temperature").unwrap().value().len(), 3);
    }

    #[test]
    fn color_respects_descriptor() {
        let mut rec = Recorder::new();
        let c3 = rec.color(&[1.0, 0.0, 0.0]).unwrap();
        assert!(matches!(
            c3.request(),
            Request::Color { color } if color.len() == 3
        ));

        rec.color_samples(&[1.0; 12], &[1.0; 12]).unwrap();
        let err = rec.color(&[1.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingData);
        let c4 = rec.color(&[1.0, 0.0, 0.0, 0.5]).unwrap();
        assert!(matches!(
            c4.request(),
            Request::Color { color } if color.len() == 4
        ));
    }

    #[test]
    fn color_samples_rebinds_color_parameters() {
        let mut rec = Recorder::new();
        rec.color_samples(&[1.0; 12], &[1.0; 12]).unwrap();
        let sphere = rec
            .sphere(
                1.0,
                -1.0,
                1.0,
                360.0,
                &[("Cs", RawData::Floats(&[0.1; 16]))],
            )
            .unwrap();
        let params = sphere.request().params().unwrap();
        // varying color under 4 channels on a quadric: 4 * 4 floats.
        assert_eq!(params.get("Cs").unwrap().value().len(), 16);
    }

    #[test]
    fn basis_steps_feed_patch_mesh_counts() {
        let mut rec = Recorder::new();
        // Default bezier step 3: a 7-point nonperiodic direction has 2
        // patches, 3 varying positions.
        let mesh = rec
            .patch_mesh(
                PatchType::Bicubic,
                7,
                Wrap::NonPeriodic,
                4,
                Wrap::NonPeriodic,
                &[("Pz", RawData::Floats(&[0.0; 28]))],
            )
            .unwrap();
        assert_eq!(
            mesh.request().params().unwrap().get("Pz").unwrap().value().len(),
            28
        );

        // 6 varying values suffice at bezier steps (3x2 positions).
        rec.patch_mesh(
            PatchType::Bicubic,
            7,
            Wrap::NonPeriodic,
            4,
            Wrap::NonPeriodic,
            &[("s", RawData::Floats(&[0.0; 6]))],
        )
        .unwrap();

        rec.basis(B_SPLINE_BASIS, B_SPLINE_STEP, B_SPLINE_BASIS, B_SPLINE_STEP)
            .unwrap();
        assert_eq!(rec.basis_steps(), (1, 1));
        // Step 1 makes it 4x1 patches, 5x2 varying positions.
        let err = rec
            .patch_mesh(
                PatchType::Bicubic,
                7,
                Wrap::NonPeriodic,
                4,
                Wrap::NonPeriodic,
                &[("s", RawData::Floats(&[0.0; 6]))],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingData);
    }

    #[test]
    fn bad_basis_steps_are_rejected() {
        let mut rec = Recorder::new();
        let err = rec
            .basis(B_SPLINE_BASIS, 0, B_SPLINE_BASIS, 1)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Range);
        assert_eq!(rec.basis_steps(), (3, 3));
    }

    #[test]
    fn light_slots_are_monotonic() {
        let mut rec = Recorder::new();
        let (_, a) = rec.light_source("pointlight", &[]).unwrap();
        let (_, b) = rec.area_light_source("arealight", &[]).unwrap();
        assert_eq!(a, LightId(0));
        assert_eq!(b, LightId(1));
        let (_, o) = rec.object_begin().unwrap();
        assert_eq!(o, ObjectId(0));
    }

    #[test]
    fn points_polygons_checks_vertex_index_count() {
        let rec = Recorder::new();
        let err = rec
            .points_polygons(&[3, 3], &[0, 1, 2, 2, 1], &[])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Consistency);
    }

    #[test]
    fn nu_patch_checks_knot_lengths() {
        let rec = Recorder::new();
        let err = rec
            .nu_patch(
                6,
                4,
                &[0.0; 9],
                0.0,
                1.0,
                4,
                4,
                &[0.0; 8],
                0.0,
                1.0,
                &[],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Consistency);
    }

    #[test]
    fn subdivision_mesh_checks_tag_arguments() {
        let rec = Recorder::new();
        let err = rec
            .subdivision_mesh(
                "catmull-clark",
                &[4],
                &[0, 1, 2, 3],
                &["crease"],
                &[2, 1],
                &[0, 1],
                &[], // one float arg promised, none given
                &[],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Consistency);
    }

    #[test]
    fn trim_curve_checks_array_shapes() {
        let rec = Recorder::new();
        // One loop, one curve of order 3 with 5 points: knot = 3 + 5.
        let ok = rec.trim_curve(
            &[1],
            &[3],
            &[0.0; 8],
            &[0.0],
            &[1.0],
            &[5],
            &[0.0; 5],
            &[0.0; 5],
            &[1.0; 5],
        );
        assert!(ok.is_ok());

        let err = rec
            .trim_curve(
                &[1],
                &[3],
                &[0.0; 7],
                &[0.0],
                &[1.0],
                &[5],
                &[0.0; 5],
                &[0.0; 5],
                &[1.0; 5],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Consistency);
    }
}
