#![allow(clippy::unwrap_used)]

use zonegeom::math::polygon_2d::Winding;
use zonegeom::math::Point3;
use zonegeom::operations::{BuildInteriorReference, StartSelection};
use zonegeom::{CanonicalizeBuilding, ProcessOptions, Surface, SurfaceType, WindingPolicy};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// 10 x 10 x 3 box. Floor is listed as given, the roof over the same
/// footprint, and every face winds the same way round the solid.
fn box_zone(zone: &str, x0: f64) -> Vec<Surface> {
    let a = p(x0, 0.0, 0.0);
    let b = p(x0 + 10.0, 0.0, 0.0);
    let c = p(x0 + 10.0, 10.0, 0.0);
    let d = p(x0, 10.0, 0.0);
    let a2 = p(x0, 0.0, 3.0);
    let b2 = p(x0 + 10.0, 0.0, 3.0);
    let c2 = p(x0 + 10.0, 10.0, 3.0);
    let d2 = p(x0, 10.0, 3.0);
    let name = |s: &str| format!("{zone}_{s}");
    vec![
        Surface::new(name("floor"), zone, SurfaceType::Floor, vec![a, b, c, d]),
        Surface::new(name("roof"), zone, SurfaceType::Roof, vec![a2, d2, c2, b2]),
        Surface::new(name("south"), zone, SurfaceType::Wall, vec![a, a2, b2, b]),
        Surface::new(name("east"), zone, SurfaceType::Wall, vec![b, b2, c2, c]),
        Surface::new(name("north"), zone, SurfaceType::Wall, vec![c, c2, d2, d]),
        Surface::new(name("west"), zone, SurfaceType::Wall, vec![d, d2, a2, a]),
    ]
}

fn sorted(points: &[Point3]) -> Vec<[f64; 3]> {
    let mut v: Vec<[f64; 3]> = points.iter().map(|q| [q.x, q.y, q.z]).collect();
    v.sort_by(|l, r| l.partial_cmp(r).unwrap());
    v
}

fn is_rotation_of(original: &[Point3], current: &[Point3]) -> bool {
    (0..original.len()).any(|k| {
        let mut r = original.to_vec();
        r.rotate_left(k);
        r == current
    })
}

#[test]
fn worked_example_is_closed() {
    init_tracing();
    let mut surfaces = box_zone("Z1", 0.0);

    let interior = BuildInteriorReference::new("Z1", &surfaces[0].vertices)
        .execute()
        .unwrap();
    assert_eq!(interior.len(), 2);

    let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    let z1 = report.zone("Z1").unwrap();
    assert!(z1.is_ok(), "{report}");
    assert!(report.failures().is_empty());
    assert_eq!(surfaces[0].vertices[0], p(0.0, 0.0, 0.0));
    // Roof starts at the farthest second-quadrant corner.
    assert_eq!(surfaces[1].vertices[0], p(0.0, 10.0, 3.0));
}

#[test]
fn canonicalization_only_rotates() {
    let original = box_zone("Z1", 0.0);
    let mut surfaces = original.clone();
    CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    for (before, after) in original.iter().zip(&surfaces) {
        assert_eq!(before.name, after.name);
        assert_eq!(sorted(&before.vertices), sorted(&after.vertices));
        assert!(
            is_rotation_of(&before.vertices, &after.vertices),
            "{} was not rotated cyclically",
            after.name
        );
    }
}

#[test]
fn missing_wall_opens_zone() {
    init_tracing();
    let mut surfaces: Vec<Surface> = box_zone("Z1", 0.0)
        .into_iter()
        .filter(|s| s.name != "Z1_south")
        .collect();
    let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    assert!(!report.is_closed());
    let failures = report.failures();
    assert!(!failures.is_empty());
    for failure in &failures {
        assert_eq!(failure.zone, "Z1");
        assert!(failure.vertex.y.abs() < 1e-12, "{} is off the south wall", failure.vertex);
    }
    assert_eq!(failures.len(), 4);
}

#[test]
fn second_pass_changes_nothing() {
    let mut surfaces = box_zone("Z1", 0.0);
    CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    let once = surfaces.clone();
    let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    assert_eq!(surfaces, once);
    assert_eq!(report.summary().reordered_surfaces, 0);
}

#[test]
fn zones_are_independent() {
    let mut surfaces = box_zone("A", 0.0);
    let mut broken = box_zone("B", 20.0);
    broken.retain(|s| s.name != "B_roof");
    surfaces.extend(broken);

    let report = CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    assert!(report.zone("A").unwrap().is_closed());
    assert!(!report.zone("B").unwrap().is_closed());
    let open: Vec<&str> = report.open_zones().map(|z| z.zone.as_str()).collect();
    assert_eq!(open, ["B"]);
    assert!(report.failures().iter().all(|f| f.zone == "B" && (f.vertex.z - 3.0).abs() < 1e-12));
}

#[test]
fn parallel_matches_serial() {
    let mut input = Vec::new();
    for (i, zone) in ["A", "B", "C", "D"].into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        input.extend(box_zone(zone, 20.0 * i as f64 - 30.0));
    }
    let mut parallel = input.clone();
    let mut serial = input;
    let rp = CanonicalizeBuilding::new(&mut parallel).execute().unwrap();
    let rs = CanonicalizeBuilding::new(&mut serial)
        .with_options(ProcessOptions {
            parallel: false,
            ..ProcessOptions::default()
        })
        .execute()
        .unwrap();
    assert_eq!(parallel, serial);
    assert_eq!(rp, rs);
    let zones: Vec<&str> = rp.zones.iter().map(|z| z.zone.as_str()).collect();
    assert_eq!(zones, ["A", "B", "C", "D"]);
}

fn reverse_clockwise() -> ProcessOptions {
    ProcessOptions {
        winding: WindingPolicy::ReverseClockwise,
        parallel: false,
    }
}

#[test]
fn reverse_policy_flips_whole_zone_and_stays_closed() {
    init_tracing();
    let original = box_zone("Z1", 0.0);
    let mut surfaces = original.clone();
    let report = CanonicalizeBuilding::new(&mut surfaces)
        .with_options(reverse_clockwise())
        .execute()
        .unwrap();
    let z1 = report.zone("Z1").unwrap();
    assert!(z1.is_ok(), "{report}");

    // Floor and roof wind clockwise seen from outside, so every face flips.
    let floor = z1.surfaces.iter().find(|s| s.name == "Z1_floor").unwrap();
    assert_eq!(floor.outcome.winding, Some(Winding::Clockwise));
    assert_eq!(floor.outcome.start.selection, StartSelection::Quadrant);
    assert!(z1.surfaces.iter().all(|s| s.outcome.reversed));
    for (before, after) in original.iter().zip(&surfaces) {
        let mut flipped = before.vertices.clone();
        flipped.reverse();
        assert!(is_rotation_of(&flipped, &after.vertices), "{} was not reversed", after.name);
    }
    assert_eq!(surfaces[0].vertices[0], p(0.0, 0.0, 0.0));
    assert_eq!(surfaces[1].vertices[0], p(0.0, 10.0, 3.0));

    let once = surfaces.clone();
    let again = CanonicalizeBuilding::new(&mut surfaces)
        .with_options(reverse_clockwise())
        .execute()
        .unwrap();
    assert!(again.is_closed());
    assert_eq!(surfaces, once);
    assert_eq!(again.summary().reordered_surfaces, 0);
}

#[test]
fn reverse_policy_keeps_counter_clockwise_zone() {
    let mut surfaces = box_zone("Z1", 0.0);
    for s in &mut surfaces {
        s.vertices.reverse();
    }
    let report = CanonicalizeBuilding::new(&mut surfaces)
        .with_options(reverse_clockwise())
        .execute()
        .unwrap();
    let z1 = report.zone("Z1").unwrap();
    assert!(z1.is_ok(), "{report}");
    assert!(z1.surfaces.iter().all(|s| !s.outcome.reversed));
    let roof = z1.surfaces.iter().find(|s| s.name == "Z1_roof").unwrap();
    assert_eq!(roof.outcome.winding, Some(Winding::CounterClockwise));
}

#[test]
fn records_round_trip_through_json() {
    let json = r#"[
        {"name": "F", "zone_name": "Z1", "surface_type": "Floor",
         "vertices": [{"X": 4, "Y": 0, "Z": 0}, {"X": 4, "Y": 4, "Z": 0},
                      {"X": 0, "Y": 4, "Z": 0}, {"X": 0, "Y": 0, "Z": 0}]}
    ]"#;
    let mut surfaces: Vec<Surface> = serde_json::from_str(json).unwrap();
    CanonicalizeBuilding::new(&mut surfaces).execute().unwrap();
    assert_eq!(surfaces[0].vertices[0], p(0.0, 0.0, 0.0));
    let back = serde_json::to_value(&surfaces).unwrap();
    assert_eq!(back[0]["vertices"][0]["X"], 0.0);
    assert_eq!(back[0]["vertices"][1]["X"], 4.0);
}
