use {
    crate::{
        mesh::RenderBuffer,
        noise::Perlin,
        types::{Color, Material, Transform},
        util::{self, Lerp, TAU},
    },
    log::debug,
    nalgebra::{Point3, Rotation2, Unit, UnitQuaternion, Vector2, Vector3},
    rand::Rng,
    std::f32::consts::PI,
};

/// Largest fraction of the remaining gap the smoothed disorder closes per update.
pub const DISORDER_CHANGE_RATE: f32 = 0.04;

/// How far a fully disordered triangle can be pushed along its normal.
pub const DISPLACEMENT_SCALE: f32 = 40.0;

/// How far a fully disordered disk recedes from the viewer.
pub const RECEDE_DISTANCE: f32 = 50.0;

/// Noise seed offsets are drawn from `[0, NOISE_SEED_RANGE)` on both axes.
pub const NOISE_SEED_RANGE: f32 = 100.0;

pub const ORDERED_DIFFUSE: (u8, u8, u8) = (255, 255, 0);
pub const DISTORTED_DIFFUSE: (u8, u8, u8) = (192, 192, 192);
pub const SHININESS: f32 = 120.0;

const DEGENERATE_EPSILON: f32 = 1.0e-6;

/// Where in the noise field each of a triangle's four channels is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSeeds {
    pub normal_x: Vector2<f32>,
    pub normal_y: Vector2<f32>,
    pub normal_z: Vector2<f32>,
    pub distance: Vector2<f32>,
}

impl NoiseSeeds {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut seed = || {
            Vector2::new(rng.gen_range(0.0..NOISE_SEED_RANGE), rng.gen_range(0.0..NOISE_SEED_RANGE))
        };
        NoiseSeeds { normal_x: seed(), normal_y: seed(), normal_z: seed(), distance: seed() }
    }
}

/// One undisplaced triangle of the disk, in the disk's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Anchor vertex.
    pub position: Point3<f32>,
    /// Anchor to second vertex.
    pub edge1: Vector3<f32>,
    /// Anchor to third vertex.
    pub edge2: Vector3<f32>,
    pub seeds: NoiseSeeds,
}

/// Steps the smoothed disorder towards `target`.
///
/// Moves by exactly `rate` when further than `rate` away, otherwise lands on `target`.
pub fn smooth_disorder(current: f32, target: f32, rate: f32) -> f32 {
    let diff = (target - current).abs().max(rate);
    current.lerp(&target, rate / diff)
}

/// A ring of noise displaced triangles.
///
/// Flat and still at disorder 0. As disorder rises it recedes, spins, and its triangles fly
/// apart along their own noisy normals.
#[derive(Debug)]
pub struct Disk {
    center: Point3<f32>,
    outer_radius: f32,
    rotation_speed: f32,
    angle: f32,
    disorder: f32,
    disorder_change_rate: f32,
    last_update: Option<f64>,
    transform: Transform,
    material: Material,
    noise: Perlin,
    triangles: Vec<Triangle>,
    mesh: RenderBuffer,
}

impl Disk {
    pub fn new(
        center: Point3<f32>,
        inner_radius: f32,
        outer_radius: f32,
        num_segments: u32,
        num_rings: u32,
    ) -> Self {
        Disk::with_rng(
            center,
            inner_radius,
            outer_radius,
            num_segments,
            num_rings,
            &mut rand::thread_rng(),
        )
    }

    /// Same as `new`, drawing the noise field and seed offsets from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        center: Point3<f32>,
        inner_radius: f32,
        outer_radius: f32,
        num_segments: u32,
        num_rings: u32,
        rng: &mut R,
    ) -> Self {
        let noise = Perlin::from_rng(rng);
        let triangles = build_disk(inner_radius, outer_radius, num_segments, num_rings, rng);
        debug!(
            "disk at ({}, {}, {}) with {} triangles",
            center.x,
            center.y,
            center.z,
            triangles.len()
        );

        let mut disk = Disk {
            center,
            outer_radius,
            rotation_speed: 0.0,
            angle: 0.0,
            disorder: 0.0,
            disorder_change_rate: DISORDER_CHANGE_RATE,
            last_update: None,
            transform: Transform::new(center, UnitQuaternion::identity()),
            material: Material { diffuse: ordered_diffuse(), shininess: SHININESS },
            noise,
            triangles,
            mesh: RenderBuffer::new(),
        };
        disk.update_mesh();
        disk
    }

    /// Angular velocity in radians per second at full disorder.
    pub fn set_rotation_speed(&mut self, value: f32) {
        self.rotation_speed = value;
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Advances the disk by one frame.
    ///
    /// `disorder_signal` is 0 for ordered, 1 for fully distorted; values outside that range are
    /// clamped and NaN counts as fully distorted. `now` is in seconds and must not run backwards.
    pub fn update(&mut self, disorder_signal: f32, now: f64) {
        let target = if disorder_signal.is_nan() { 1.0 } else { disorder_signal.clamp(0.0, 1.0) };
        self.disorder = smooth_disorder(self.disorder, target, self.disorder_change_rate);

        // only the frame delta is narrowed, absolute time stays f64
        let elapsed = self.last_update.map_or(0.0, |prev| (now - prev) as f32);
        self.last_update = Some(now);
        let angular_velocity = 0.0_f32.lerp(&self.rotation_speed, self.disorder);
        self.angle = util::wrap_angle(self.angle + angular_velocity * elapsed);

        let recede =
            Vector3::<f32>::zeros().lerp(&Vector3::new(0.0, 0.0, -RECEDE_DISTANCE), self.disorder);
        self.transform = Transform::new(
            self.center + recede,
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.angle),
        );

        self.update_mesh();

        self.material.diffuse = ordered_diffuse().lerp(&distorted_diffuse(), self.disorder);
    }

    /// Rebuilds the render mesh from the triangles at the current angle and disorder.
    fn update_mesh(&mut self) {
        self.mesh.clear();
        self.mesh.ensure_capacity(self.triangles.len() * 3);

        let flat = Vector3::z_axis();
        let t = self.disorder;
        // the sample point circles with the disk so the turbulence turns with it
        let sample = Rotation2::new(self.angle) * Vector2::x();

        let noise = &self.noise;
        let signed = |seed: Vector2<f32>| {
            let p = seed + sample;
            noise.sample_signed(p.x, p.y)
        };
        let unsigned = |seed: Vector2<f32>| {
            let p = seed + sample;
            noise.sample(p.x, p.y)
        };

        for tri in &self.triangles {
            let dist = 0.0_f32.lerp(&signed(tri.seeds.distance), t);

            let candidate = candidate_normal(
                signed(tri.seeds.normal_x),
                signed(tri.seeds.normal_y),
                unsigned(tri.seeds.normal_z),
            );
            let normal = slerp_axis(&flat, &candidate, t);

            let position = tri.position + normal.into_inner() * dist * DISPLACEMENT_SCALE;
            let rot = UnitQuaternion::rotation_between_axis(&flat, &normal)
                .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));

            self.mesh.append_triangle(
                [position, position + rot * tri.edge1, position + rot * tri.edge2],
                normal.into_inner(),
            );
        }
    }

    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// Current rotation about the disk's normal, in `[0, TAU)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Smoothed disorder in `[0, 1]`.
    pub fn disorder(&self) -> f32 {
        self.disorder
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Local space mesh from the most recent update.
    pub fn render_mesh(&self) -> &RenderBuffer {
        &self.mesh
    }

    /// Placement of the local mesh in world space.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

fn ordered_diffuse() -> Color {
    let (r, g, b) = ORDERED_DIFFUSE;
    Color::rgb8(r, g, b)
}

fn distorted_diffuse() -> Color {
    let (r, g, b) = DISTORTED_DIFFUSE;
    Color::rgb8(r, g, b)
}

/// Normalized noise normal, or the flat axis when the noise cancels out.
fn candidate_normal(x: f32, y: f32, z: f32) -> Unit<Vector3<f32>> {
    Unit::try_new(Vector3::new(x, y, z), DEGENERATE_EPSILON).unwrap_or_else(Vector3::z_axis)
}

/// Spherical interpolation that returns the endpoints exactly at `t` of 0 and 1.
fn slerp_axis(from: &Unit<Vector3<f32>>, to: &Unit<Vector3<f32>>, t: f32) -> Unit<Vector3<f32>> {
    if t <= 0.0 {
        return *from;
    }
    if t >= 1.0 {
        return *to;
    }
    from.try_slerp(to, t, DEGENERATE_EPSILON).unwrap_or_else(|| {
        // nearly parallel, a normalized lerp is indistinguishable
        Unit::try_new(from.lerp(&to.into_inner(), t), DEGENERATE_EPSILON).unwrap_or(*from)
    })
}

/// Tessellates the annulus into `num_segments * num_rings` triangles.
///
/// Within each ring the anchor alternates between the inner and outer edge, so neighbouring
/// triangles zigzag around the ring instead of fanning out from one apex.
fn build_disk<R: Rng + ?Sized>(
    inner_radius: f32,
    outer_radius: f32,
    num_segments: u32,
    num_rings: u32,
    rng: &mut R,
) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(num_segments as usize * num_rings as usize);

    let ring_inc = (outer_radius - inner_radius) / num_rings as f32;
    let step = |s: i64| s as f32 * TAU / num_segments as f32;
    for ring in 0..num_rings {
        let inr = inner_radius + ring as f32 * ring_inc;
        let outr = inner_radius + (ring + 1) as f32 * ring_inc;
        for seg in 0..num_segments {
            let angle1 = step(seg as i64);
            let angle2 = step(seg as i64 + 1);
            let angle3 = step(seg as i64 - 1);

            let even = (seg + ring) % 2 == 0;
            let (r1, r2) = if even { (inr, outr) } else { (outr, inr) };

            let pt1 = util::length_at_angle(r1, angle1);
            let pt2 = util::length_at_angle(r2, angle2);
            let pt3 = util::length_at_angle(r2, angle3);

            let (edge1, edge2) = if even { (pt2 - pt1, pt3 - pt1) } else { (pt3 - pt1, pt2 - pt1) };

            let seeds = NoiseSeeds::random(rng);
            triangles.push(Triangle { position: pt1, edge1, edge2, seeds });
        }
    }

    triangles
}
