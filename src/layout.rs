use {
    crate::{disk::Disk, error::Error},
    nalgebra::{Point2, Point3},
    rand::Rng,
    regex::Regex,
    smallvec::SmallVec,
    std::path::Path,
};

/// Half width of the band of a disk drawn by dragging.
pub const DRAG_BAND: f32 = 10.0;
const DRAG_SEGMENTS: u32 = 120;
const DRAG_RINGS: u32 = 5;

/// Placement and tessellation of one disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskSpec {
    pub x: f32,
    pub y: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    pub rings: u32,
}

impl DiskSpec {
    pub const fn new(
        x: f32,
        y: f32,
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
        rings: u32,
    ) -> Self {
        DiskSpec { x, y, inner_radius, outer_radius, segments, rings }
    }

    /// A disk centered where a drag started, its band straddling the point where it ended.
    pub fn dragged(start: Point2<f32>, end: Point2<f32>) -> Self {
        let radius = (end - start).norm();
        DiskSpec::new(
            start.x,
            start.y,
            (radius - DRAG_BAND).max(0.0),
            radius + DRAG_BAND,
            DRAG_SEGMENTS,
            DRAG_RINGS,
        )
    }

    pub fn build<R: Rng + ?Sized>(&self, rotation_speed: f32, rng: &mut R) -> Disk {
        let mut disk = Disk::with_rng(
            Point3::new(self.x, self.y, 0.0),
            self.inner_radius,
            self.outer_radius,
            self.segments,
            self.rings,
            rng,
        );
        disk.set_rotation_speed(rotation_speed);
        disk
    }
}

/// The disks of the installation wall.
pub const DEFAULT_LAYOUT: [DiskSpec; 7] = [
    DiskSpec::new(-260.0, 180.0, 60.0, 80.0, 120, 5),
    DiskSpec::new(-120.0, 40.0, 90.0, 120.0, 120, 8),
    DiskSpec::new(180.0, 120.0, 80.0, 100.0, 120, 6),
    DiskSpec::new(60.0, 190.0, 60.0, 80.0, 120, 5),
    DiskSpec::new(-180.0, -120.0, 80.0, 100.0, 120, 7),
    DiskSpec::new(40.0, -20.0, 80.0, 100.0, 120, 7),
    DiskSpec::new(170.0, -160.0, 100.0, 120.0, 120, 5),
];

pub fn load(path: &Path) -> Result<Vec<DiskSpec>, Error> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}

/// Parses a layout, one `disk <x> <y> <inner> <outer> <segments> <rings>` per line.
///
/// Blank lines and anything after `#` are ignored.
pub fn parse(contents: &str) -> Result<Vec<DiskSpec>, Error> {
    let re = Regex::new(r"^disk(?:\s+(?P<args>.*))?$").expect("static regex");
    let mut specs = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let caps =
            re.captures(text).ok_or_else(|| Error::Syntax { line, text: text.to_string() })?;
        let args: SmallVec<[&str; 6]> =
            caps.name("args").map(|m| m.as_str().split_whitespace().collect()).unwrap_or_default();
        if args.len() != 6 {
            return Err(Error::ArgCount { line, found: args.len() });
        }

        let number = |value: &str| -> Result<f32, Error> {
            value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::InvalidNumber { line, value: value.to_string() })
        };
        let count = |value: &str| -> Result<u32, Error> {
            value.parse::<u32>().map_err(|_| Error::InvalidNumber { line, value: value.to_string() })
        };

        let spec = DiskSpec::new(
            number(args[0])?,
            number(args[1])?,
            number(args[2])?,
            number(args[3])?,
            count(args[4])?,
            count(args[5])?,
        );
        validate(&spec).map_err(|reason| Error::Geometry { line, reason })?;
        specs.push(spec);
    }

    Ok(specs)
}

fn validate(spec: &DiskSpec) -> Result<(), String> {
    if spec.inner_radius < 0.0 {
        return Err(format!("inner radius {} is negative", spec.inner_radius));
    }
    if spec.outer_radius <= spec.inner_radius {
        return Err(format!(
            "outer radius {} must be larger than inner radius {}",
            spec.outer_radius, spec.inner_radius
        ));
    }
    if spec.segments == 0 || spec.rings == 0 {
        return Err("a disk needs at least one segment and one ring".to_string());
    }
    Ok(())
}

/// Formats a spec as a layout line, the inverse of `parse`.
pub fn format_spec(spec: &DiskSpec) -> String {
    format!(
        "disk {} {} {} {} {} {}",
        spec.x, spec.y, spec.inner_radius, spec.outer_radius, spec.segments, spec.rings
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_disks_and_skips_comments() {
        let specs = parse(
            "# the wall\n\
             disk -260 180 60 80 120 5\n\
             \n\
             disk 40.5 -20 80 100 64 7   # center left\n",
        )
        .unwrap();
        assert_eq!(
            specs,
            vec![
                DiskSpec::new(-260.0, 180.0, 60.0, 80.0, 120, 5),
                DiskSpec::new(40.5, -20.0, 80.0, 100.0, 64, 7),
            ]
        );
    }

    #[test]
    fn default_layout_round_trips_through_text() {
        let text: Vec<String> = DEFAULT_LAYOUT.iter().map(format_spec).collect();
        assert_eq!(parse(&text.join("\n")).unwrap(), DEFAULT_LAYOUT.to_vec());
    }

    #[test]
    fn dragged_disk_straddles_the_release_point() {
        let spec = DiskSpec::dragged(Point2::new(-100.0, 50.0), Point2::new(-100.0, 130.0));
        assert_eq!(spec, DiskSpec::new(-100.0, 50.0, 70.0, 90.0, 120, 5));
        assert_eq!(format_spec(&spec), "disk -100 50 70 90 120 5");
        assert_eq!(parse(&format_spec(&spec)).unwrap(), vec![spec]);

        // a short drag still gives a valid disk
        let small = DiskSpec::dragged(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_eq!((small.inner_radius, small.outer_radius), (0.0, 15.0));
        assert!(parse(&format_spec(&small)).is_ok());
    }

    #[test]
    fn reports_line_numbers() {
        match parse("disk 0 0 10 20 4 1\nring 0 0 10 20 4 1") {
            Err(Error::Syntax { line: 2, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse("\n\ndisk 0 0 10 20 4") {
            Err(Error::ArgCount { line: 3, found: 5 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse("disk") {
            Err(Error::ArgCount { line: 1, found: 0 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match parse("disk 0 zero 10 20 4 1") {
            Err(Error::InvalidNumber { line: 1, value }) => assert_eq!(value, "zero"),
            other => panic!("unexpected {:?}", other),
        }
        match parse("disk 0 0 10 20 -4 1") {
            Err(Error::InvalidNumber { value, .. }) => assert_eq!(value, "-4"),
            other => panic!("unexpected {:?}", other),
        }
        match parse("disk 0 inf 10 20 4 1") {
            Err(Error::InvalidNumber { value, .. }) => assert_eq!(value, "inf"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_geometry() {
        for text in [
            "disk 0 0 20 10 4 1",
            "disk 0 0 -1 10 4 1",
            "disk 0 0 10 20 0 1",
            "disk 0 0 10 20 4 0",
        ] {
            assert!(matches!(parse(text), Err(Error::Geometry { line: 1, .. })), "{}", text);
        }
    }

    #[test]
    fn build_sets_rotation_speed() {
        use rand::{rngs::StdRng, SeedableRng};
        let disk = DEFAULT_LAYOUT[1].build(0.5, &mut StdRng::seed_from_u64(1));
        assert_eq!(disk.rotation_speed(), 0.5);
        assert_eq!(disk.triangles().len(), 120 * 8);
        assert_eq!(disk.center(), Point3::new(-120.0, 40.0, 0.0));
    }
}
