use crate::declaration::StorageClass;

/// Patch and patch-mesh flavor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PatchType {
    Bilinear,
    Bicubic,
}

/// Wrap mode of a patch-mesh direction or a curve.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Wrap {
    Periodic,
    #[strum(serialize = "nonperiodic")]
    NonPeriodic,
}

impl Wrap {
    pub fn is_periodic(self) -> bool {
        self == Self::Periodic
    }
}

/// Curve flavor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum CurveType {
    Linear,
    Cubic,
}

/// Per-class element counts for one primitive call: how many values a
/// parameter of each storage class must supply. Constant is always one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValueCounts {
    pub vertex: usize,
    pub varying: usize,
    pub uniform: usize,
    pub face_vertex: usize,
    pub face_varying: usize,
}

impl Default for ValueCounts {
    fn default() -> Self {
        Self::singles()
    }
}

impl ValueCounts {
    /// All-ones counts, used by every non-geometric request (options,
    /// attributes, shaders, ...).
    pub const fn singles() -> Self {
        Self {
            vertex: 1,
            varying: 1,
            uniform: 1,
            face_vertex: 1,
            face_varying: 1,
        }
    }

    pub fn select(&self, class: StorageClass) -> usize {
        match class {
            StorageClass::Constant => 1,
            StorageClass::Uniform => self.uniform,
            StorageClass::Varying => self.varying,
            StorageClass::Vertex => self.vertex,
            StorageClass::FaceVarying => self.face_varying,
            StorageClass::FaceVertex => self.face_vertex,
        }
    }

    pub fn polygon(nvertices: usize) -> Self {
        Self {
            vertex: nvertices,
            varying: nvertices,
            uniform: 1,
            face_vertex: nvertices,
            face_varying: nvertices,
        }
    }

    pub fn general_polygon(nverts: &[i32]) -> Self {
        let sum = sum_counts(nverts);
        Self {
            vertex: sum,
            varying: sum,
            uniform: 1,
            face_vertex: sum,
            face_varying: sum,
        }
    }

    pub fn points_polygons(nverts: &[i32], verts: &[i32]) -> Self {
        let corners = sum_counts(nverts);
        let points = max_index_plus_one(verts);
        Self {
            vertex: points,
            varying: points,
            uniform: nverts.len(),
            face_vertex: corners,
            face_varying: corners,
        }
    }

    pub fn points_general_polygons(nloops: &[i32], nverts: &[i32], verts: &[i32]) -> Self {
        let corners = sum_counts(nverts);
        let points = max_index_plus_one(verts);
        Self {
            vertex: points,
            varying: points,
            uniform: nloops.len(),
            face_vertex: corners,
            face_varying: corners,
        }
    }

    pub fn patch(ty: PatchType) -> Self {
        Self {
            vertex: match ty {
                PatchType::Bilinear => 4,
                PatchType::Bicubic => 16,
            },
            varying: 4,
            uniform: 1,
            face_vertex: 4,
            face_varying: 4,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn patch_mesh(
        ty: PatchType,
        nu: usize,
        uwrap: Wrap,
        nv: usize,
        vwrap: Wrap,
        ustep: usize,
        vstep: usize,
    ) -> Self {
        let upatches = mesh_patches(ty, nu, uwrap, ustep);
        let vpatches = mesh_patches(ty, nv, vwrap, vstep);
        let uvarying = mesh_varying(upatches, uwrap);
        let vvarying = mesh_varying(vpatches, vwrap);
        let uniform = upatches * vpatches;
        Self {
            vertex: nu * nv,
            varying: uvarying * vvarying,
            uniform,
            face_vertex: 4 * uniform,
            face_varying: 4 * uniform,
        }
    }

    pub fn nu_patch(nu: usize, uorder: usize, nv: usize, vorder: usize) -> Self {
        let usegments = (nu + 1).saturating_sub(uorder);
        let vsegments = (nv + 1).saturating_sub(vorder);
        let uniform = usegments * vsegments;
        Self {
            vertex: nu * nv,
            varying: (usegments + 1) * (vsegments + 1),
            uniform,
            face_vertex: 4 * uniform,
            face_varying: 4 * uniform,
        }
    }

    pub fn quadric() -> Self {
        Self {
            vertex: 4,
            varying: 4,
            uniform: 1,
            face_vertex: 4,
            face_varying: 4,
        }
    }

    pub fn points(npoints: usize) -> Self {
        Self {
            vertex: npoints,
            varying: npoints,
            uniform: 1,
            face_vertex: npoints,
            face_varying: npoints,
        }
    }

    pub fn curves(ty: CurveType, nvertices: &[i32], wrap: Wrap, vstep: usize) -> Self {
        let vertex = sum_counts(nvertices);
        let varying = nvertices
            .iter()
            .map(|&n| curve_varying(ty, n.max(0) as usize, wrap, vstep))
            .sum();
        Self {
            vertex,
            varying,
            uniform: nvertices.len(),
            face_vertex: vertex,
            face_varying: varying,
        }
    }

    pub fn subdivision_mesh(nvertices: &[i32], vertices: &[i32]) -> Self {
        let corners = sum_counts(nvertices);
        let points = max_index_plus_one(vertices);
        Self {
            vertex: points,
            varying: points,
            uniform: nvertices.len(),
            face_vertex: corners,
            face_varying: corners,
        }
    }

    pub fn blobby(nleaf: usize) -> Self {
        Self {
            vertex: nleaf,
            varying: nleaf,
            uniform: 1,
            face_vertex: nleaf,
            face_varying: nleaf,
        }
    }
}

fn sum_counts(counts: &[i32]) -> usize {
    counts.iter().map(|&n| n.max(0) as usize).sum()
}

fn max_index_plus_one(indices: &[i32]) -> usize {
    indices.iter().map(|&i| i.max(-1) + 1).max().unwrap_or(0) as usize
}

fn mesh_patches(ty: PatchType, n: usize, wrap: Wrap, step: usize) -> usize {
    match (ty, wrap) {
        (PatchType::Bilinear, Wrap::Periodic) => n,
        (PatchType::Bilinear, Wrap::NonPeriodic) => n.saturating_sub(1),
        (PatchType::Bicubic, Wrap::Periodic) => {
            if step == 0 { 0 } else { n / step }
        }
        (PatchType::Bicubic, Wrap::NonPeriodic) => {
            if step == 0 {
                0
            } else {
                n.saturating_sub(4) / step + 1
            }
        }
    }
}

fn mesh_varying(patches: usize, wrap: Wrap) -> usize {
    if wrap.is_periodic() { patches } else { patches + 1 }
}

fn curve_varying(ty: CurveType, nverts: usize, wrap: Wrap, vstep: usize) -> usize {
    match ty {
        CurveType::Linear => nverts,
        CurveType::Cubic => {
            if vstep == 0 {
                return 0;
            }
            let segments = if wrap.is_periodic() {
                nverts / vstep
            } else {
                nverts.saturating_sub(4) / vstep + 1
            };
            if wrap.is_periodic() {
                segments
            } else {
                segments + 1
            }
        }
    }
}
