//! Record → replay round trips against a backend double that stores every
//! argument it receives.

use riband::{
    ArchiveCallback, ArchiveKind, CurveType, FilterFunc, LightHandle, LightId, ObjectHandle,
    ParamView, PatchType, RawData, Recorder, Reel, ReelKind, RenderBackend, ReplayState,
    RibandResult, RtMatrix, Value, Wrap,
};

#[derive(Clone, Debug, PartialEq)]
enum Event {
    WorldBegin,
    WorldEnd,
    AttributeBegin,
    AttributeEnd,
    Declare(String, String),
    Format(i32, i32, f32),
    Translate(f32, f32, f32),
    Rotate(f32, f32, f32, f32),
    ConcatTransform(RtMatrix),
    Color(Vec<f32>),
    ColorSamples(Vec<f32>, Vec<f32>),
    PixelFilter(FilterFunc, f32, f32),
    Surface(String, Params),
    LightSource(String, Params),
    Illuminate(LightHandle, bool),
    ObjectBegin,
    ObjectEnd,
    ObjectInstance(ObjectHandle),
    Sphere(f32, f32, f32, f32, Params),
    Torus(f32, f32, f32, f32, f32, Params),
    Polygon(i32, Params),
    PointsPolygons(Vec<i32>, Vec<i32>, Params),
    PatchMesh(PatchType, i32, Wrap, i32, Wrap, Params),
    Curves(CurveType, Vec<i32>, Wrap, Params),
    SubdivisionMesh(String, Vec<i32>, Vec<i32>, Vec<String>, Vec<i32>, Params),
    MakeTexture(String, String, String, String, FilterFunc, f32, f32),
    ArchiveRecord(ArchiveKind, String),
    ReadArchive(String, bool, Params),
}

type Params = Vec<(String, Value)>;

fn collect(params: ParamView<'_>) -> Params {
    params
        .pairs()
        .map(|(token, value)| (token.to_string(), value.clone()))
        .collect()
}

#[derive(Default)]
struct MockBackend {
    events: Vec<Event>,
    next_light: u32,
    next_object: u32,
}

impl RenderBackend for MockBackend {
    fn declare(&mut self, name: &str, declaration: &str) -> RibandResult<()> {
        self.events
            .push(Event::Declare(name.to_string(), declaration.to_string()));
        Ok(())
    }

    fn world_begin(&mut self) -> RibandResult<()> {
        self.events.push(Event::WorldBegin);
        Ok(())
    }

    fn world_end(&mut self) -> RibandResult<()> {
        self.events.push(Event::WorldEnd);
        Ok(())
    }

    fn attribute_begin(&mut self) -> RibandResult<()> {
        self.events.push(Event::AttributeBegin);
        Ok(())
    }

    fn attribute_end(&mut self) -> RibandResult<()> {
        self.events.push(Event::AttributeEnd);
        Ok(())
    }

    fn format(&mut self, xres: i32, yres: i32, aspect: f32) -> RibandResult<()> {
        self.events.push(Event::Format(xres, yres, aspect));
        Ok(())
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> RibandResult<()> {
        self.events.push(Event::Translate(dx, dy, dz));
        Ok(())
    }

    fn rotate(&mut self, angle: f32, dx: f32, dy: f32, dz: f32) -> RibandResult<()> {
        self.events.push(Event::Rotate(angle, dx, dy, dz));
        Ok(())
    }

    fn concat_transform(&mut self, matrix: &RtMatrix) -> RibandResult<()> {
        self.events.push(Event::ConcatTransform(*matrix));
        Ok(())
    }

    fn color(&mut self, color: &[f32]) -> RibandResult<()> {
        self.events.push(Event::Color(color.to_vec()));
        Ok(())
    }

    fn color_samples(&mut self, n_rgb: &[f32], rgb_n: &[f32]) -> RibandResult<()> {
        self.events
            .push(Event::ColorSamples(n_rgb.to_vec(), rgb_n.to_vec()));
        Ok(())
    }

    fn pixel_filter(&mut self, func: FilterFunc, xwidth: f32, ywidth: f32) -> RibandResult<()> {
        self.events.push(Event::PixelFilter(func, xwidth, ywidth));
        Ok(())
    }

    fn surface(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<()> {
        self.events
            .push(Event::Surface(name.to_string(), collect(params)));
        Ok(())
    }

    fn light_source(&mut self, name: &str, params: ParamView<'_>) -> RibandResult<LightHandle> {
        self.events
            .push(Event::LightSource(name.to_string(), collect(params)));
        let handle = LightHandle(100 + self.next_light);
        self.next_light += 1;
        Ok(handle)
    }

    fn illuminate(&mut self, light: LightHandle, on: bool) -> RibandResult<()> {
        self.events.push(Event::Illuminate(light, on));
        Ok(())
    }

    fn object_begin(&mut self) -> RibandResult<ObjectHandle> {
        self.events.push(Event::ObjectBegin);
        let handle = ObjectHandle(700 + self.next_object);
        self.next_object += 1;
        Ok(handle)
    }

    fn object_end(&mut self) -> RibandResult<()> {
        self.events.push(Event::ObjectEnd);
        Ok(())
    }

    fn object_instance(&mut self, handle: ObjectHandle) -> RibandResult<()> {
        self.events.push(Event::ObjectInstance(handle));
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
        self.events
            .push(Event::Sphere(radius, zmin, zmax, thetamax, collect(params)));
        Ok(())
    }

    fn torus(
        &mut self,
        major_radius: f32,
        minor_radius: f32,
        phimin: f32,
        phimax: f32,
        thetamax: f32,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events.push(Event::Torus(
            major_radius,
            minor_radius,
            phimin,
            phimax,
            thetamax,
            collect(params),
        ));
        Ok(())
    }

    fn polygon(&mut self, nvertices: i32, params: ParamView<'_>) -> RibandResult<()> {
        self.events.push(Event::Polygon(nvertices, collect(params)));
        Ok(())
    }

    fn points_polygons(
        &mut self,
        nverts: &[i32],
        verts: &[i32],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events.push(Event::PointsPolygons(
            nverts.to_vec(),
            verts.to_vec(),
            collect(params),
        ));
        Ok(())
    }

    fn patch_mesh(
        &mut self,
        kind: PatchType,
        nu: i32,
        uwrap: Wrap,
        nv: i32,
        vwrap: Wrap,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events
            .push(Event::PatchMesh(kind, nu, uwrap, nv, vwrap, collect(params)));
        Ok(())
    }

    fn curves(
        &mut self,
        kind: CurveType,
        nvertices: &[i32],
        wrap: Wrap,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events
            .push(Event::Curves(kind, nvertices.to_vec(), wrap, collect(params)));
        Ok(())
    }

    fn subdivision_mesh(
        &mut self,
        scheme: &str,
        nvertices: &[i32],
        vertices: &[i32],
        tags: &[String],
        nargs: &[i32],
        _int_args: &[i32],
        _float_args: &[f32],
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events.push(Event::SubdivisionMesh(
            scheme.to_string(),
            nvertices.to_vec(),
            vertices.to_vec(),
            tags.to_vec(),
            nargs.to_vec(),
            collect(params),
        ));
        Ok(())
    }

    fn make_texture(
        &mut self,
        picture: &str,
        texture: &str,
        swrap: &str,
        twrap: &str,
        filter: FilterFunc,
        swidth: f32,
        twidth: f32,
        _params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events.push(Event::MakeTexture(
            picture.to_string(),
            texture.to_string(),
            swrap.to_string(),
            twrap.to_string(),
            filter,
            swidth,
            twidth,
        ));
        Ok(())
    }

    fn archive_record(&mut self, kind: ArchiveKind, record: &str) -> RibandResult<()> {
        self.events
            .push(Event::ArchiveRecord(kind, record.to_string()));
        Ok(())
    }

    fn read_archive(
        &mut self,
        name: &str,
        callback: Option<&ArchiveCallback>,
        params: ParamView<'_>,
    ) -> RibandResult<()> {
        self.events.push(Event::ReadArchive(
            name.to_string(),
            callback.is_some(),
            collect(params),
        ));
        Ok(())
    }
}

fn replay(reel: &Reel, backend: &mut MockBackend) {
    let mut state = ReplayState::new();
    reel.replay(backend, &mut state, None).unwrap();
}

#[test]
fn sphere_roundtrip_preserves_exact_arguments() {
    let mut rec = Recorder::new();
    rec.set_line(12);

    // varying color on a quadric: 4 corners x 3 channels.
    let cs: Vec<f32> = [1.0f32, 0.0, 0.0].repeat(4);
    let call = rec
        .sphere(2.0, -2.0, 2.0, 360.0, &[("Cs", RawData::Floats(&cs))])
        .unwrap();
    assert_eq!(call.line(), Some(12));

    let mut reel = Reel::new("sphere", ReelKind::Archive);
    reel.add(call).unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);

    assert_eq!(
        backend.events,
        vec![Event::Sphere(
            2.0,
            -2.0,
            2.0,
            360.0,
            vec![("Cs".to_string(), Value::Floats(cs))]
        )]
    );
}

#[test]
fn replay_invokes_backend_in_recorded_order_once_each() {
    let rec = Recorder::new();
    let mut reel = Reel::new("order", ReelKind::Archive);
    reel.record(rec.world_begin()).unwrap();
    reel.record(rec.translate(1.0, 2.0, 3.0)).unwrap();
    reel.record(rec.world_end()).unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);
    assert_eq!(
        backend.events,
        vec![
            Event::WorldBegin,
            Event::Translate(1.0, 2.0, 3.0),
            Event::WorldEnd,
        ]
    );
}

#[test]
fn fixed_arguments_and_parameter_arrays_survive_replay() {
    let rec = Recorder::new();
    let mut reel = Reel::new("geometry", ReelKind::Archive);

    let p9 = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    reel.record(rec.polygon(
        3,
        &[
            ("P", RawData::Floats(&p9)),
            ("st", RawData::Floats(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0])),
        ],
    ))
    .unwrap();

    let p12 = [0.0f32; 12];
    reel.record(rec.points_polygons(
        &[3, 3],
        &[0, 1, 2, 2, 1, 3],
        &[("P", RawData::Floats(&p12))],
    ))
    .unwrap();

    reel.record(rec.patch_mesh(
        PatchType::Bilinear,
        2,
        Wrap::NonPeriodic,
        2,
        Wrap::NonPeriodic,
        &[("P", RawData::Floats(&p12))],
    ))
    .unwrap();

    reel.record(rec.curves(
        CurveType::Cubic,
        &[7],
        Wrap::NonPeriodic,
        &[("width", RawData::Floats(&[0.1, 0.2, 0.3]))],
    ))
    .unwrap();

    reel.record(rec.subdivision_mesh(
        "catmull-clark",
        &[4],
        &[0, 1, 2, 3],
        &["interpolateboundary"],
        &[0, 0],
        &[],
        &[],
        &[("P", RawData::Floats(&p12))],
    ))
    .unwrap();

    reel.record(rec.torus(1.0, 0.25, 0.0, 360.0, 270.0, &[]))
        .unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);

    assert_eq!(
        backend.events,
        vec![
            Event::Polygon(
                3,
                vec![
                    ("P".to_string(), Value::Floats(p9.to_vec())),
                    (
                        "st".to_string(),
                        Value::Floats(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
                    ),
                ]
            ),
            Event::PointsPolygons(
                vec![3, 3],
                vec![0, 1, 2, 2, 1, 3],
                vec![("P".to_string(), Value::Floats(p12.to_vec()))]
            ),
            Event::PatchMesh(
                PatchType::Bilinear,
                2,
                Wrap::NonPeriodic,
                2,
                Wrap::NonPeriodic,
                vec![("P".to_string(), Value::Floats(p12.to_vec()))]
            ),
            Event::Curves(
                CurveType::Cubic,
                vec![7],
                Wrap::NonPeriodic,
                vec![("width".to_string(), Value::Floats(vec![0.1, 0.2, 0.3]))]
            ),
            Event::SubdivisionMesh(
                "catmull-clark".to_string(),
                vec![4],
                vec![0, 1, 2, 3],
                vec!["interpolateboundary".to_string()],
                vec![0, 0],
                vec![("P".to_string(), Value::Floats(p12.to_vec()))]
            ),
            Event::Torus(1.0, 0.25, 0.0, 360.0, 270.0, vec![]),
        ]
    );
}

#[test]
fn light_and_object_slots_bind_to_backend_handles() {
    let mut rec = Recorder::new();
    let mut reel = Reel::new("handles", ReelKind::Archive);

    let (call, key) = rec
        .light_source("pointlight", &[("intensity", RawData::Floats(&[2.5]))])
        .unwrap();
    reel.add(call).unwrap();
    let (call, spot) = rec.light_source("spotlight", &[]).unwrap();
    reel.add(call).unwrap();
    reel.record(rec.illuminate(spot, false)).unwrap();
    reel.record(rec.illuminate(key, true)).unwrap();

    let (call, obj) = rec.object_begin().unwrap();
    reel.add(call).unwrap();
    reel.record(rec.sphere(1.0, -1.0, 1.0, 360.0, &[])).unwrap();
    reel.record(rec.object_end()).unwrap();
    reel.record(rec.object_instance(obj)).unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);

    assert_eq!(
        backend.events,
        vec![
            Event::LightSource(
                "pointlight".to_string(),
                vec![("intensity".to_string(), Value::Floats(vec![2.5]))]
            ),
            Event::LightSource("spotlight".to_string(), vec![]),
            Event::Illuminate(LightHandle(101), false),
            Event::Illuminate(LightHandle(100), true),
            Event::ObjectBegin,
            Event::Sphere(1.0, -1.0, 1.0, 360.0, vec![]),
            Event::ObjectEnd,
            Event::ObjectInstance(ObjectHandle(700)),
        ]
    );
}

#[test]
fn replaying_an_unbound_slot_is_a_bad_handle() {
    use riband::{Call, ErrorCode, Request};

    let mut reel = Reel::new("dangling", ReelKind::Archive);
    reel.add(Call::new(
        None,
        Request::Illuminate {
            slot: LightId(5),
            on: true,
        },
    ))
    .unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    let mut state = ReplayState::new();
    let err = reel.replay(&mut backend, &mut state, None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadHandle);
    assert!(backend.events.is_empty());
}

#[test]
fn color_samples_rebinds_later_color_arguments() {
    let mut rec = Recorder::new();
    let mut reel = Reel::new("colors", ReelKind::Archive);

    reel.record(rec.color(&[1.0, 0.0, 0.0])).unwrap();
    let n_rgb = [0.5f32; 12];
    let rgb_n = [0.25f32; 12];
    reel.record(rec.color_samples(&n_rgb, &rgb_n)).unwrap();
    reel.record(rec.color(&[0.1, 0.2, 0.3, 0.4])).unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);
    assert_eq!(
        backend.events,
        vec![
            Event::Color(vec![1.0, 0.0, 0.0]),
            Event::ColorSamples(n_rgb.to_vec(), rgb_n.to_vec()),
            Event::Color(vec![0.1, 0.2, 0.3, 0.4]),
        ]
    );
}

#[test]
fn filters_and_texture_baking_roundtrip() {
    let rec = Recorder::new();
    let mut reel = Reel::new("textures", ReelKind::Archive);
    reel.record(rec.pixel_filter(FilterFunc::Gaussian, 2.0, 2.0))
        .unwrap();
    reel.record(rec.make_texture(
        "grid.tif",
        "grid.tex",
        "periodic",
        "clamp",
        FilterFunc::CatmullRom,
        4.0,
        4.0,
        &[],
    ))
    .unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);
    assert_eq!(
        backend.events,
        vec![
            Event::PixelFilter(FilterFunc::Gaussian, 2.0, 2.0),
            Event::MakeTexture(
                "grid.tif".to_string(),
                "grid.tex".to_string(),
                "periodic".to_string(),
                "clamp".to_string(),
                FilterFunc::CatmullRom,
                4.0,
                4.0
            ),
        ]
    );
}

#[test]
fn inline_declarations_replay_with_their_original_token() {
    let rec = Recorder::new();
    let mut reel = Reel::new("inline", ReelKind::Archive);
    reel.record(rec.surface(
        "wood",
        &[
            ("Ka", RawData::Floats(&[0.3])),
            ("uniform float[2] rings", RawData::Floats(&[12.0, 0.5])),
        ],
    ))
    .unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);
    assert_eq!(
        backend.events,
        vec![Event::Surface(
            "wood".to_string(),
            vec![
                ("Ka".to_string(), Value::Floats(vec![0.3])),
                (
                    "uniform float[2] rings".to_string(),
                    Value::Floats(vec![12.0, 0.5])
                ),
            ]
        )]
    );
}

#[test]
fn archive_callback_threads_through_archive_reels_only() {
    use std::sync::{Arc, Mutex};

    let rec = Recorder::new();
    let seen: Arc<Mutex<Vec<(ArchiveKind, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let callback = {
        let seen = Arc::clone(&seen);
        ArchiveCallback::new(move |kind, text| {
            seen.lock().unwrap().push((kind, text.to_string()));
        })
    };

    let mut archive = Reel::new("archive", ReelKind::Archive);
    archive
        .record(rec.archive_record(ArchiveKind::Comment, "camera block"))
        .unwrap();
    archive.close();

    let mut backend = MockBackend::default();
    let mut state = ReplayState::new();
    archive
        .replay(&mut backend, &mut state, Some(&callback))
        .unwrap();
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[(ArchiveKind::Comment, "camera block".to_string())]
    );

    // Same calls in an object reel: the callback must stay silent.
    let mut object = Reel::new("object", ReelKind::Object);
    object
        .record(rec.archive_record(ArchiveKind::Comment, "camera block"))
        .unwrap();
    object.close();
    object
        .replay(&mut backend, &mut state, Some(&callback))
        .unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(backend.events.len(), 2);
}

#[test]
fn read_archive_prefers_its_own_recorded_callback() {
    let rec = Recorder::new();
    let own = ArchiveCallback::new(|_, _| {});

    let mut reel = Reel::new("read", ReelKind::Archive);
    reel.record(rec.read_archive("city.rib", Some(own), &[]))
        .unwrap();
    reel.record(rec.read_archive("props.rib", None, &[])).unwrap();
    reel.close();

    let mut backend = MockBackend::default();
    replay(&reel, &mut backend);
    assert_eq!(
        backend.events,
        vec![
            Event::ReadArchive("city.rib".to_string(), true, vec![]),
            Event::ReadArchive("props.rib".to_string(), false, vec![]),
        ]
    );
}
