#![allow(dead_code)]
use lanelet_roundabout::prelude::*;

pub fn poly(u: u64) -> PolygonId {
    PolygonId::new(u)
}

pub fn line(u: u64) -> LineStringId {
    LineStringId::new(u)
}

pub fn lanelet(u: u64) -> LaneletId {
    LaneletId::new(u)
}

/// Roundabout with id `id` over lanelet 1, initial area `area` and stop
/// lines `stop_lines`.
pub fn roundabout(id: u64, area: u64, stop_lines: &[u64]) -> Roundabout {
    Roundabout::make(
        RegElemId::new(id),
        AttributeMap::new(),
        lanelet(1),
        poly(area),
        stop_lines.iter().copied().map(line),
    )
}

/// Map holding points 1..=4, line strings 10..=12, polygons 20..=22 and
/// lanelet 1 bounded by line strings 10 and 11.
pub fn host_map() -> LaneletMap {
    let mut map = LaneletMap::new();
    for raw in 1..=4u64 {
        map.add_point(Point3d::new(PointId::new(raw), raw as f64, 0.0, 0.0))
            .unwrap();
    }
    for (raw, a, b) in [(10, 1, 2), (11, 3, 4), (12, 1, 3)] {
        map.add_line_string(LineString3d::new(
            line(raw),
            vec![PointId::new(a), PointId::new(b)],
        ))
        .unwrap();
    }
    for raw in 20..=22 {
        map.add_polygon(Polygon3d::new(
            poly(raw),
            vec![PointId::new(1), PointId::new(2), PointId::new(3)],
        ))
        .unwrap();
    }
    map.add_lanelet(Lanelet::new(lanelet(1), line(10), line(11)))
        .unwrap();
    map
}
