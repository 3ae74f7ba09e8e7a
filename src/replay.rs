use crate::{
    backend::RenderBackend,
    callbacks::ArchiveCallback,
    error::{RibandError, RibandResult},
    request::{Call, Request},
    types::{LightHandle, LightId, ObjectHandle, ObjectId},
};

/// Bindings from recorder-assigned slots to backend-returned handles,
/// filled in as the creating calls replay.
#[derive(Clone, Debug)]
pub struct HandleMap<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for HandleMap<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T: Copy> HandleMap<T> {
    pub fn bind(&mut self, slot: u32, handle: T) {
        let at = slot as usize;
        if at >= self.slots.len() {
            self.slots.resize(at + 1, None);
        }
        self.slots[at] = Some(handle);
    }

    pub fn get(&self, slot: u32, what: &str) -> RibandResult<T> {
        self.slots
            .get(slot as usize)
            .copied()
            .flatten()
            .ok_or_else(|| {
                RibandError::bad_handle(format!("{what} slot {slot} was never bound"))
            })
    }
}

/// Per-replay state: which backend handle each recorded light/object slot
/// resolved to. One state spans however many reels are replayed into the
/// same backend.
#[derive(Clone, Debug, Default)]
pub struct ReplayState {
    lights: HandleMap<LightHandle>,
    objects: HandleMap<ObjectHandle>,
}

impl ReplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_light(&mut self, slot: LightId, handle: LightHandle) {
        self.lights.bind(slot.0, handle);
    }

    pub fn light(&self, slot: LightId) -> RibandResult<LightHandle> {
        self.lights.get(slot.0, "light")
    }

    pub fn bind_object(&mut self, slot: ObjectId, handle: ObjectHandle) {
        self.objects.bind(slot.0, handle);
    }

    pub fn object(&self, slot: ObjectId) -> RibandResult<ObjectHandle> {
        self.objects.get(slot.0, "object")
    }
}

impl Call {
    /// Invokes the one backend method matching this record, passing the
    /// stored arguments in original order. Backend errors propagate
    /// unchanged. `callback` is the archive observer threaded by the
    /// enclosing reel; handle-creating calls bind their slot in `state`.
    pub fn replay(
        &self,
        backend: &mut dyn RenderBackend,
        state: &mut ReplayState,
        callback: Option<&ArchiveCallback>,
    ) -> RibandResult<()> {
        match self.request() {
            Request::ErrorHandler { handler } => backend.error_handler(*handler),
            Request::Declare { name, declaration } => backend.declare(name, declaration),
            Request::FrameBegin { frame } => backend.frame_begin(*frame),
            Request::FrameEnd => backend.frame_end(),
            Request::WorldBegin => backend.world_begin(),
            Request::WorldEnd => backend.world_end(),
            Request::AttributeBegin => backend.attribute_begin(),
            Request::AttributeEnd => backend.attribute_end(),
            Request::TransformBegin => backend.transform_begin(),
            Request::TransformEnd => backend.transform_end(),
            Request::SolidBegin { operation } => backend.solid_begin(operation),
            Request::SolidEnd => backend.solid_end(),
            Request::ObjectBegin { slot } => {
                let handle = backend.object_begin()?;
                state.bind_object(*slot, handle);
                Ok(())
            }
            Request::ObjectEnd => backend.object_end(),
            Request::ObjectInstance { slot } => {
                let handle = state.object(*slot)?;
                backend.object_instance(handle)
            }
            Request::MotionBegin { times } => backend.motion_begin(times),
            Request::MotionEnd => backend.motion_end(),
            Request::Format { xres, yres, aspect } => backend.format(*xres, *yres, *aspect),
            Request::FrameAspectRatio { aspect } => backend.frame_aspect_ratio(*aspect),
            Request::ScreenWindow {
                left,
                right,
                bottom,
                top,
            } => backend.screen_window(*left, *right, *bottom, *top),
            Request::CropWindow {
                xmin,
                xmax,
                ymin,
                ymax,
            } => backend.crop_window(*xmin, *xmax, *ymin, *ymax),
            Request::Projection { params } => backend.projection(params.name(), params.view()),
            Request::Clipping { near, far } => backend.clipping(*near, *far),
            Request::ClippingPlane {
                x,
                y,
                z,
                nx,
                ny,
                nz,
            } => backend.clipping_plane(*x, *y, *z, *nx, *ny, *nz),
            Request::DepthOfField {
                fstop,
                focal_length,
                focal_distance,
            } => backend.depth_of_field(*fstop, *focal_length, *focal_distance),
            Request::Shutter { open, close } => backend.shutter(*open, *close),
            Request::PixelVariance { variance } => backend.pixel_variance(*variance),
            Request::PixelSamples { xsamples, ysamples } => {
                backend.pixel_samples(*xsamples, *ysamples)
            }
            Request::PixelFilter {
                func,
                xwidth,
                ywidth,
            } => backend.pixel_filter(*func, *xwidth, *ywidth),
            Request::Exposure { gain, gamma } => backend.exposure(*gain, *gamma),
            Request::Imager { params } => backend.imager(params.name(), params.view()),
            Request::Quantize {
                kind,
                one,
                min,
                max,
                dither,
            } => backend.quantize(kind, *one, *min, *max, *dither),
            Request::Display { kind, mode, params } => {
                backend.display(params.name(), kind, mode, params.view())
            }
            Request::DisplayChannel { params } => {
                backend.display_channel(params.name(), params.view())
            }
            Request::Hider { params } => backend.hider(params.name(), params.view()),
            Request::ColorSamples { n_rgb, rgb_n } => backend.color_samples(n_rgb, rgb_n),
            Request::RelativeDetail { relative_detail } => {
                backend.relative_detail(*relative_detail)
            }
            Request::Option { params } => backend.option(params.name(), params.view()),
            Request::LightSource { slot, params } => {
                let handle = backend.light_source(params.name(), params.view())?;
                state.bind_light(*slot, handle);
                Ok(())
            }
            Request::AreaLightSource { slot, params } => {
                let handle = backend.area_light_source(params.name(), params.view())?;
                state.bind_light(*slot, handle);
                Ok(())
            }
            Request::Illuminate { slot, on } => {
                let handle = state.light(*slot)?;
                backend.illuminate(handle, *on)
            }
            Request::Attribute { params } => backend.attribute(params.name(), params.view()),
            Request::Color { color } => backend.color(color),
            Request::Opacity { opacity } => backend.opacity(opacity),
            Request::Surface { params } => backend.surface(params.name(), params.view()),
            Request::Atmosphere { params } => backend.atmosphere(params.name(), params.view()),
            Request::Interior { params } => backend.interior(params.name(), params.view()),
            Request::Exterior { params } => backend.exterior(params.name(), params.view()),
            Request::Displacement { params } => {
                backend.displacement(params.name(), params.view())
            }
            Request::Deformation { params } => backend.deformation(params.name(), params.view()),
            Request::TextureCoordinates {
                s1,
                t1,
                s2,
                t2,
                s3,
                t3,
                s4,
                t4,
            } => backend.texture_coordinates(*s1, *t1, *s2, *t2, *s3, *t3, *s4, *t4),
            Request::ShadingRate { size } => backend.shading_rate(*size),
            Request::ShadingInterpolation { kind } => backend.shading_interpolation(kind),
            Request::Matte { on } => backend.matte(*on),
            Request::Bound { bound } => backend.bound(bound),
            Request::Detail { bound } => backend.detail(bound),
            Request::DetailRange {
                min_visible,
                lower_transition,
                upper_transition,
                max_visible,
            } => backend.detail_range(
                *min_visible,
                *lower_transition,
                *upper_transition,
                *max_visible,
            ),
            Request::GeometricApproximation { kind, value } => {
                backend.geometric_approximation(kind, *value)
            }
            Request::GeometricRepresentation { kind } => {
                backend.geometric_representation(kind)
            }
            Request::Orientation { orientation } => backend.orientation(orientation),
            Request::ReverseOrientation => backend.reverse_orientation(),
            Request::Sides { nsides } => backend.sides(*nsides),
            Request::Identity => backend.identity(),
            Request::Transform { matrix } => backend.transform(matrix),
            Request::ConcatTransform { matrix } => backend.concat_transform(matrix),
            Request::Perspective { fov } => backend.perspective(*fov),
            Request::Translate { dx, dy, dz } => backend.translate(*dx, *dy, *dz),
            Request::Rotate { angle, dx, dy, dz } => backend.rotate(*angle, *dx, *dy, *dz),
            Request::Scale { dx, dy, dz } => backend.scale(*dx, *dy, *dz),
            Request::Skew {
                angle,
                dx1,
                dy1,
                dz1,
                dx2,
                dy2,
                dz2,
            } => backend.skew(*angle, *dx1, *dy1, *dz1, *dx2, *dy2, *dz2),
            Request::CoordinateSystem { name } => backend.coordinate_system(name),
            Request::CoordSysTransform { name } => backend.coord_sys_transform(name),
            Request::Polygon { nvertices, params } => {
                backend.polygon(*nvertices, params.view())
            }
            Request::GeneralPolygon { nverts, params } => {
                backend.general_polygon(nverts, params.view())
            }
            Request::PointsPolygons {
                nverts,
                verts,
                params,
            } => backend.points_polygons(nverts, verts, params.view()),
            Request::PointsGeneralPolygons {
                nloops,
                nverts,
                verts,
                params,
            } => backend.points_general_polygons(nloops, nverts, verts, params.view()),
            Request::Basis {
                ubasis,
                ustep,
                vbasis,
                vstep,
            } => backend.basis(ubasis, *ustep, vbasis, *vstep),
            Request::Patch { kind, params } => backend.patch(*kind, params.view()),
            Request::PatchMesh {
                kind,
                nu,
                uwrap,
                nv,
                vwrap,
                params,
            } => backend.patch_mesh(*kind, *nu, *uwrap, *nv, *vwrap, params.view()),
            Request::NuPatch {
                nu,
                uorder,
                uknot,
                umin,
                umax,
                nv,
                vorder,
                vknot,
                vmin,
                vmax,
                params,
            } => backend.nu_patch(
                *nu,
                *uorder,
                uknot,
                *umin,
                *umax,
                *nv,
                *vorder,
                vknot,
                *vmin,
                *vmax,
                params.view(),
            ),
            Request::TrimCurve {
                ncurves,
                order,
                knot,
                min,
                max,
                n,
                u,
                v,
                w,
            } => backend.trim_curve(ncurves, order, knot, min, max, n, u, v, w),
            Request::Sphere {
                radius,
                zmin,
                zmax,
                thetamax,
                params,
            } => backend.sphere(*radius, *zmin, *zmax, *thetamax, params.view()),
            Request::Cone {
                height,
                radius,
                thetamax,
                params,
            } => backend.cone(*height, *radius, *thetamax, params.view()),
            Request::Cylinder {
                radius,
                zmin,
                zmax,
                thetamax,
                params,
            } => backend.cylinder(*radius, *zmin, *zmax, *thetamax, params.view()),
            Request::Hyperboloid {
                point1,
                point2,
                thetamax,
                params,
            } => backend.hyperboloid(*point1, *point2, *thetamax, params.view()),
            Request::Paraboloid {
                rmax,
                zmin,
                zmax,
                thetamax,
                params,
            } => backend.paraboloid(*rmax, *zmin, *zmax, *thetamax, params.view()),
            Request::Disk {
                height,
                radius,
                thetamax,
                params,
            } => backend.disk(*height, *radius, *thetamax, params.view()),
            Request::Torus {
                major_radius,
                minor_radius,
                phimin,
                phimax,
                thetamax,
                params,
            } => backend.torus(
                *major_radius,
                *minor_radius,
                *phimin,
                *phimax,
                *thetamax,
                params.view(),
            ),
            Request::Points { npoints, params } => backend.points(*npoints, params.view()),
            Request::Curves {
                kind,
                nvertices,
                wrap,
                params,
            } => backend.curves(*kind, nvertices, *wrap, params.view()),
            Request::Blobby {
                nleaf,
                code,
                floats,
                strings,
                params,
            } => backend.blobby(*nleaf, code, floats, strings, params.view()),
            Request::Procedural { data, bound, func } => {
                backend.procedural(data, bound, *func)
            }
            Request::Geometry { params } => backend.geometry(params.name(), params.view()),
            Request::SubdivisionMesh {
                scheme,
                nvertices,
                vertices,
                tags,
                nargs,
                int_args,
                float_args,
                params,
            } => backend.subdivision_mesh(
                scheme,
                nvertices,
                vertices,
                tags,
                nargs,
                int_args,
                float_args,
                params.view(),
            ),
            Request::MakeTexture {
                picture,
                texture,
                swrap,
                twrap,
                filter,
                swidth,
                twidth,
                params,
            } => backend.make_texture(
                picture,
                texture,
                swrap,
                twrap,
                *filter,
                *swidth,
                *twidth,
                params.view(),
            ),
            Request::MakeBump {
                picture,
                texture,
                swrap,
                twrap,
                filter,
                swidth,
                twidth,
                params,
            } => backend.make_bump(
                picture,
                texture,
                swrap,
                twrap,
                *filter,
                *swidth,
                *twidth,
                params.view(),
            ),
            Request::MakeLatLongEnvironment {
                picture,
                texture,
                filter,
                swidth,
                twidth,
                params,
            } => backend.make_lat_long_environment(
                picture,
                texture,
                *filter,
                *swidth,
                *twidth,
                params.view(),
            ),
            Request::MakeCubeFaceEnvironment {
                px,
                nx,
                py,
                ny,
                pz,
                nz,
                texture,
                fov,
                filter,
                swidth,
                twidth,
                params,
            } => backend.make_cube_face_environment(
                px,
                nx,
                py,
                ny,
                pz,
                nz,
                texture,
                *fov,
                *filter,
                *swidth,
                *twidth,
                params.view(),
            ),
            Request::MakeShadow {
                picture,
                texture,
                params,
            } => backend.make_shadow(picture, texture, params.view()),
            Request::ArchiveRecord { kind, record } => {
                backend.archive_record(*kind, record)?;
                if let Some(cb) = callback {
                    cb.call(*kind, record);
                }
                Ok(())
            }
            Request::ReadArchive {
                callback: own,
                params,
            } => backend.read_archive(params.name(), own.as_ref().or(callback), params.view()),
        }
    }
}
