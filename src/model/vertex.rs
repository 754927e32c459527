use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::math::Point3;

/// Hashable identity of a vertex under exact coordinate equality.
///
/// `-0.0` and `0.0` share a key, matching `==` on `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([u64; 3]);

impl VertexKey {
    /// Key for a point.
    #[must_use]
    pub fn new(point: &Point3) -> Self {
        Self([bits(point.x), bits(point.y), bits(point.z)])
    }
}

impl From<&Point3> for VertexKey {
    fn from(point: &Point3) -> Self {
        Self::new(point)
    }
}

#[allow(clippy::float_cmp)]
fn bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Wire shape of a single vertex: `{"X": .., "Y": .., "Z": ..}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct VertexRecord {
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "Z")]
    z: f64,
}

/// Serde adapter for `Vec<Point3>` stored as a list of vertex records.
pub(crate) mod vertex_list {
    use super::{Deserialize, Deserializer, Point3, Serialize, Serializer, VertexRecord};

    pub fn serialize<S: Serializer>(points: &[Point3], serializer: S) -> Result<S::Ok, S::Error> {
        let records: Vec<VertexRecord> = points
            .iter()
            .map(|p| VertexRecord {
                x: p.x,
                y: p.y,
                z: p.z,
            })
            .collect();
        records.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point3>, D::Error> {
        let records = Vec::<VertexRecord>::deserialize(deserializer)?;
        Ok(records.into_iter().map(|r| Point3::new(r.x, r.y, r.z)).collect())
    }
}
