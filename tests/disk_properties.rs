use {
    gateway::{
        disk::{smooth_disorder, Disk, DISORDER_CHANGE_RATE},
        util::TAU,
    },
    nalgebra::{Point3, Vector3},
    proptest::prelude::*,
    rand::{rngs::StdRng, SeedableRng},
};

fn seeded_disk(segments: u32, rings: u32, seed: u64) -> Disk {
    Disk::with_rng(
        Point3::new(0.0, 0.0, 0.0),
        10.0,
        20.0,
        segments,
        rings,
        &mut StdRng::seed_from_u64(seed),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn triangle_count_is_segments_times_rings(segments in 1u32..64, rings in 1u32..12) {
        let disk = seeded_disk(segments, rings, 0);
        prop_assert_eq!(disk.triangles().len(), (segments * rings) as usize);
        prop_assert_eq!(disk.render_mesh().len(), (segments * rings * 3) as usize);
    }

    #[test]
    fn angle_stays_in_range(
        speed in -20.0f32..20.0,
        steps in prop::collection::vec((0.0f32..1.0, 0.0f64..0.5), 1..60),
    ) {
        let mut disk = seeded_disk(8, 1, 1);
        disk.set_rotation_speed(speed);
        let mut now = 0.0;
        for (signal, dt) in steps {
            now += dt;
            disk.update(signal, now);
            prop_assert!(disk.angle() >= 0.0 && disk.angle() < TAU, "angle {}", disk.angle());
            prop_assert!(disk.disorder() >= 0.0 && disk.disorder() <= 1.0);
        }
    }

    #[test]
    fn zero_elapsed_time_keeps_angle(
        signals in prop::collection::vec(0.0f32..1.0, 2..10),
        now in 0.0f64..1000.0,
    ) {
        let mut disk = seeded_disk(8, 1, 2);
        disk.set_rotation_speed(3.0);
        disk.update(1.0, now - 1.0);
        disk.update(1.0, now);
        let angle = disk.angle();
        for signal in signals {
            disk.update(signal, now);
            prop_assert_eq!(disk.angle(), angle);
        }
    }

    #[test]
    fn forward_time_turns_forward(dt in 0.001f64..0.1) {
        let mut disk = seeded_disk(8, 1, 3);
        disk.set_rotation_speed(1.0);
        disk.update(1.0, 0.0);
        disk.update(1.0, 1.0);
        let before = disk.angle();
        disk.update(1.0, 1.0 + dt);
        let turned = (disk.angle() - before).rem_euclid(TAU);
        prop_assert!(turned > 0.0);
    }
}

#[test]
fn smoothing_follows_the_two_branch_formula() {
    for i in 0..=20 {
        for j in 0..=20 {
            let before = i as f32 / 20.0;
            let target = j as f32 / 20.0;
            let after = smooth_disorder(before, target, DISORDER_CHANGE_RATE);
            let gap = (target - before).abs();
            if gap > DISORDER_CHANGE_RATE {
                let step = (after - before).abs();
                assert!((step - DISORDER_CHANGE_RATE).abs() < 1e-6, "{} -> {}", before, target);
                assert_eq!((after - before).signum(), (target - before).signum());
            } else {
                assert_eq!(after, target, "{} -> {}", before, target);
            }
        }
    }
}

#[test]
fn disorder_zero_leaves_disk_flat() {
    let mut disk = seeded_disk(24, 4, 4);
    disk.set_rotation_speed(TAU / 10.0);
    let mut now = 0.0;
    for _ in 0..40 {
        now += 0.1;
        disk.update(1.0, now);
    }
    for _ in 0..40 {
        now += 0.1;
        disk.update(0.0, now);
    }
    assert_eq!(disk.disorder(), 0.0);
    let mesh = disk.render_mesh();
    for (i, tri) in disk.triangles().iter().enumerate() {
        assert_eq!(mesh.vertices()[i * 3], tri.position);
        assert_eq!(mesh.normals()[i * 3], Vector3::z());
    }
}
