//! Serde adapters for glam types.
//!
//! `glam::Vec3` has no serde impls without an extra feature; these functions
//! plug into `#[serde(serialize_with, deserialize_with)]` on fields and
//! persist vectors as plain `[x, y, z]` arrays.

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize_vec3<S>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serde::Serialize::serialize(&v.to_array(), serializer)
}

pub fn deserialize_vec3<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
where
    D: Deserializer<'de>,
{
    <[f32; 3]>::deserialize(deserializer).map(Vec3::from_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Wrapper {
        #[serde(
            serialize_with = "serialize_vec3",
            deserialize_with = "deserialize_vec3"
        )]
        v: Vec3,
    }

    #[test]
    fn test_vec3_serializes_as_array() {
        let w = Wrapper { v: Vec3::new(1.0, -2.5, 3.0) };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"v":[1.0,-2.5,3.0]}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }
}
