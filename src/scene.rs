use {
    crate::{
        disk::Disk,
        layout::DiskSpec,
        signal::{self, Signal},
    },
    log::info,
    nalgebra::Point2,
    rand::{rngs::StdRng, Rng, SeedableRng},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Where each frame's disorder signal comes from.
#[derive(Debug, Clone, Copy)]
pub enum DisorderSource {
    /// A viewer standing in front of a disk calms it; an empty room leaves everything disordered.
    Viewer(Option<Point2<f32>>),
    /// Every disk follows the same oscillation, for running unattended.
    Oscillator(Signal<f32>),
}

impl DisorderSource {
    /// Oscillates from order to full disorder and back once per `period` seconds.
    pub fn oscillator(period: f64, now: f64) -> Self {
        let oscillation = Signal::new(period, 0.0, 1.0, now).with_easing(signal::ping_pong);
        DisorderSource::Oscillator(oscillation)
    }

    /// Raw disorder signal for `disk` at `now`.
    pub fn disorder_for(&self, disk: &Disk, now: f64) -> f32 {
        match self {
            DisorderSource::Viewer(Some(viewer)) => {
                let center = disk.center();
                if (Point2::new(center.x, center.y) - viewer).norm() <= disk.outer_radius() {
                    0.0
                } else {
                    1.0
                }
            }
            DisorderSource::Viewer(None) => 1.0,
            DisorderSource::Oscillator(signal) => signal.value(now).clamp(0.0, 1.0),
        }
    }
}

/// Owns every disk on the wall and steps them once per frame.
pub struct Scene {
    disks: Vec<Disk>,
    rotation_speed: f32,
    source: DisorderSource,
    rng: StdRng,
}

impl Scene {
    pub fn new(
        specs: &[DiskSpec],
        rotation_speed: f32,
        source: DisorderSource,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scene = Scene { disks: Vec::new(), rotation_speed, source, rng };
        scene.set_layout(specs);
        scene
    }

    /// Replaces every disk with freshly built ones.
    pub fn set_layout(&mut self, specs: &[DiskSpec]) {
        let rotation_speed = self.rotation_speed;
        let rng = &mut self.rng;
        self.disks = specs.iter().map(|spec| spec.build(rotation_speed, &mut *rng)).collect();
        info!("scene has {} disks", self.disks.len());
    }

    /// Adds one disk to the wall, spinning at the scene's rotation speed.
    pub fn add_disk(&mut self, spec: &DiskSpec) {
        let disk = spec.build(self.rotation_speed, &mut self.rng);
        self.disks.push(disk);
    }

    /// Moves the viewer; ignored while an oscillator drives the disks.
    pub fn set_viewer(&mut self, viewer: Option<Point2<f32>>) {
        if let DisorderSource::Viewer(_) = self.source {
            self.source = DisorderSource::Viewer(viewer);
        }
    }

    pub fn source(&self) -> &DisorderSource {
        &self.source
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Steps every disk to `now`. Disks share nothing, so they update independently.
    pub fn update(&mut self, now: f64) {
        let source = self.source;
        let step = |disk: &mut Disk| {
            let disorder = source.disorder_for(disk, now);
            disk.update(disorder, now);
        };

        #[cfg(feature = "parallel")]
        self.disks.par_iter_mut().for_each(step);
        #[cfg(not(feature = "parallel"))]
        self.disks.iter_mut().for_each(step);
    }
}

/// A random scene for benchmarks and tests.
pub fn random_specs<R: Rng>(count: usize, rng: &mut R) -> Vec<DiskSpec> {
    (0..count)
        .map(|_| {
            let inner = rng.gen_range(40.0..100.0);
            DiskSpec::new(
                rng.gen_range(-400.0..400.0),
                rng.gen_range(-250.0..250.0),
                inner,
                inner + rng.gen_range(10.0..40.0),
                120,
                rng.gen_range(3..9),
            )
        })
        .collect()
}
