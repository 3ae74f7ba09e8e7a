use crate::{
    callbacks::{ArchiveCallback, ArchiveKind, ErrorHandlerKind, FilterFunc, ProcSubdivFunc},
    counts::{CurveType, PatchType, Wrap},
    error::RibandResult,
    params::ParamView,
    types::{LightHandle, ObjectHandle, RtBasis, RtBound, RtMatrix, RtPoint},
};

/// The replay target: one method per interface procedure, taking the
/// procedure's fixed arguments in protocol order plus the unpacked parameter
/// view. This crate only ever calls the trait; concrete renderers (RIB
/// writers, rasterizers) implement it.
///
/// Every method has a no-op default so partial backends and test doubles
/// only implement what they observe.
#[allow(unused_variables)]
pub trait RenderBackend {
    // ---- error handling and declarations ------------------------------

    fn error_handler(&mut self, handler: ErrorHandlerKind) -> RibandResult<()> {
        Ok(())
    }

    fn declare(&mut self, name: &str, declaration: &str) -> RibandResult<()> {
        Ok(())
    }

    // ---- mode blocks --------------------------------------------------

    fn frame_begin(&mut self, frame: i32) -> RibandResult<()> {
        Ok(())
    }

    fn frame_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn world_begin(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn world_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn attribute_begin(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn attribute_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn transform_begin(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn transform_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn solid_begin(&mut self, operation: &str) -> RibandResult<()> {
        Ok(())
    }

    fn solid_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    /// Starts a retained object definition; the returned handle names it in
    /// later `object_instance` calls.
    fn object_begin(&mut self) -> RibandResult<ObjectHandle> {
        Ok(ObjectHandle(0))
    }

    fn object_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn object_instance(&mut self, handle: ObjectHandle) -> RibandResult<()> {
        Ok(())
    }

    fn motion_begin(&mut self, times: &[f32]) -> RibandResult<()> {
        Ok(())
    }

    fn motion_end(&mut self) -> RibandResult<()> {
        Ok(())
    }

    // ---- camera and display options -----------------------------------

    fn format(&mut self, xres: i32, yres: i32, aspect: f32) -> RibandResult<()> {
        Ok(())
    }

    fn frame_aspect_ratio(&mut self, aspect: f32) -> RibandResult<()> {
        Ok(())
    }

    fn screen_window(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> RibandResult<()> {
        Ok(())
    }

    fn crop_window(&mut self, xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> RibandResult<()> {
        Ok(())
    }

    fn projection(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn clipping(&mut self, near: f32, far: f32) -> RibandResult<()> {
        Ok(())
    }

    fn clipping_plane(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        nx: f32,
        ny: f32,
        nz: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn depth_of_field(
        &mut self,
        fstop: f32,
        focal_length: f32,
        focal_distance: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn shutter(&mut self, open: f32, close: f32) -> RibandResult<()> {
        Ok(())
    }

    fn pixel_variance(&mut self, variance: f32) -> RibandResult<()> {
        Ok(())
    }

    fn pixel_samples(&mut self, xsamples: f32, ysamples: f32) -> RibandResult<()> {
        Ok(())
    }

    fn pixel_filter(&mut self, func: FilterFunc, xwidth: f32, ywidth: f32) -> RibandResult<()> {
        Ok(())
    }

    fn exposure(&mut self, gain: f32, gamma: f32) -> RibandResult<()> {
        Ok(())
    }

    fn imager(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn quantize(
        &mut self,
        kind: &str,
        one: i32,
        min: i32,
        max: i32,
        dither: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn display(
        &mut self,
        name: &str,
        kind: &str,
        mode: &str,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn display_channel(&mut self, channel: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn hider(&mut self, kind: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    /// Reconfigures the color channel count; `n_rgb` and `rgb_n` are the
    /// channels-to-RGB and RGB-to-channels matrices.
    fn color_samples(&mut self, n_rgb: &[f32], rgb_n: &[f32]) -> RibandResult<()> {
        Ok(())
    }

    fn relative_detail(&mut self, relative_detail: f32) -> RibandResult<()> {
        Ok(())
    }

    fn option(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    // ---- lights -------------------------------------------------------

    fn light_source(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<LightHandle> {
        Ok(LightHandle(0))
    }

    fn area_light_source(
        &mut self,
        name: &str,
        params: ParamView<'_>,
    ) -> RibandResult<LightHandle> {
        Ok(LightHandle(0))
    }

    fn illuminate(&mut self, light: LightHandle, on: bool) -> RibandResult<()> {
        Ok(())
    }

    // ---- attributes and shaders ---------------------------------------

    fn attribute(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    /// `color` carries one value per channel of the active color descriptor.
    fn color(&mut self, color: &[f32]) -> RibandResult<()> {
        Ok(())
    }

    fn opacity(&mut self, opacity: &[f32]) -> RibandResult<()> {
        Ok(())
    }

    fn surface(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn atmosphere(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn interior(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn exterior(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn displacement(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn deformation(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn texture_coordinates(
        &mut self,
        s1: f32,
        t1: f32,
        s2: f32,
        t2: f32,
        s3: f32,
        t3: f32,
        s4: f32,
        t4: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn shading_rate(&mut self, size: f32) -> RibandResult<()> {
        Ok(())
    }

    fn shading_interpolation(&mut self, kind: &str) -> RibandResult<()> {
        Ok(())
    }

    fn matte(&mut self, on: bool) -> RibandResult<()> {
        Ok(())
    }

    fn bound(&mut self, bound: &RtBound) -> RibandResult<()> {
        Ok(())
    }

    fn detail(&mut self, bound: &RtBound) -> RibandResult<()> {
        Ok(())
    }

    fn detail_range(
        &mut self,
        min_visible: f32,
        lower_transition: f32,
        upper_transition: f32,
        max_visible: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn geometric_approximation(&mut self, kind: &str, value: f32) -> RibandResult<()> {
        Ok(())
    }

    fn geometric_representation(&mut self, kind: &str) -> RibandResult<()> {
        Ok(())
    }

    fn orientation(&mut self, orientation: &str) -> RibandResult<()> {
        Ok(())
    }

    fn reverse_orientation(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn sides(&mut self, nsides: i32) -> RibandResult<()> {
        Ok(())
    }

    // ---- transformations ----------------------------------------------

    fn identity(&mut self) -> RibandResult<()> {
        Ok(())
    }

    fn transform(&mut self, matrix: &RtMatrix) -> RibandResult<()> {
        Ok(())
    }

    fn concat_transform(&mut self, matrix: &RtMatrix) -> RibandResult<()> {
        Ok(())
    }

    fn perspective(&mut self, fov: f32) -> RibandResult<()> {
        Ok(())
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> RibandResult<()> {
        Ok(())
    }

    fn rotate(&mut self, angle: f32, dx: f32, dy: f32, dz: f32) -> RibandResult<()> {
        Ok(())
    }

    fn scale(&mut self, dx: f32, dy: f32, dz: f32) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn skew(
        &mut self,
        angle: f32,
        dx1: f32,
        dy1: f32,
        dz1: f32,
        dx2: f32,
        dy2: f32,
        dz2: f32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn coordinate_system(&mut self, name: &str) -> RibandResult<()> {
        Ok(())
    }

    fn coord_sys_transform(&mut self, name: &str) -> RibandResult<()> {
        Ok(())
    }

    // ---- geometric primitives -----------------------------------------

    fn polygon(&mut self, nvertices: i32, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn general_polygon(&mut self, nverts: &[i32], params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn points_polygons(
        &mut self,
        nverts: &[i32],
        verts: &[i32],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn points_general_polygons(
        &mut self,
        nloops: &[i32],
        nverts: &[i32],
        verts: &[i32],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn basis(
        &mut self,
        ubasis: &RtBasis,
        ustep: i32,
        vbasis: &RtBasis,
        vstep: i32,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn patch(&mut self, kind: PatchType, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn patch_mesh(
        &mut self,
        kind: PatchType,
        nu: i32,
        uwrap: Wrap,
        nv: i32,
        vwrap: Wrap,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn nu_patch(
        &mut self,
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
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn trim_curve(
        &mut self,
        ncurves: &[i32],
        order: &[i32],
        knot: &[f32],
        min: &[f32],
        max: &[f32],
        n: &[i32],
        u: &[f32],
        v: &[f32],
        w: &[f32],
    ) -> RibandResult<()> {
        Ok(())
    }

    fn sphere(
        &mut self,
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn cone(
        &mut self,
        height: f32,
        radius: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn cylinder(
        &mut self,
        radius: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn hyperboloid(
        &mut self,
        point1: RtPoint,
        point2: RtPoint,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn paraboloid(
        &mut self,
        rmax: f32,
        zmin: f32,
        zmax: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn disk(
        &mut self,
        height: f32,
        radius: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn torus(
        &mut self,
        major_radius: f32,
        minor_radius: f32,
        phimin: f32,
        phimax: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn points(&mut self, npoints: i32, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    fn curves(
        &mut self,
        kind: CurveType,
        nvertices: &[i32],
        wrap: Wrap,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn blobby(
        &mut self,
        nleaf: i32,
        code: &[i32],
        floats: &[f32],
        strings: &[String],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn procedural(
        &mut self,
        data: &[String],
        bound: &RtBound,
        func: ProcSubdivFunc,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn geometry(&mut self, kind: &str, params: ParamView<'_>) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn subdivision_mesh(
        &mut self,
        scheme: &str,
        nvertices: &[i32],
        vertices: &[i32],
        tags: &[String],
        nargs: &[i32],
        int_args: &[i32],
        float_args: &[f32],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    // ---- texture baking -----------------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn make_texture(
        &mut self,
        picture: &str,
        texture: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn make_bump(
        &mut self,
        picture: &str,
        texture: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn make_lat_long_environment(
        &mut self,
        picture: &str,
        texture: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn make_cube_face_environment(
        &mut self,
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
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    fn make_shadow(
        &mut self,
        picture: &str,
        texture: &str,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }

    // ---- archives -----------------------------------------------------

    fn archive_record(&mut self, kind: ArchiveKind, record: &str) -> RibandResult<()> {
        Ok(())
    }

    fn read_archive(
        &mut self,
        name: &str,
        callback: Option<&ArchiveCallback>,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        Ok(())
    }
}
