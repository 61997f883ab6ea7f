// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project snapshot.
//!
//! This is the persisted shape of a project: everything needed to restore
//! the map exactly as it was left.

use super::pin::Pin;
use crate::util::geometry::Point;
use serde::{Deserialize, Deserializer, Serialize};

fn default_zoom() -> f64 {
    1.0
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_zoom<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_zoom))
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default = "default_zoom", deserialize_with = "null_as_default_zoom")]
    pub zoom: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: Point,
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            pins: Vec::new(),
            background_image: None,
            zoom: default_zoom(),
            offset: Point::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::Annotation;
    use crate::models::pin::PinColor;

    #[test]
    fn test_wire_field_names() {
        let mut pin = Pin::new(1700000000000, 1.5, 2.5);
        pin.color = PinColor::Green;
        pin.images.push(Annotation {
            src: "data:image/png;base64,AAAA".to_string(),
            text: "north gate".to_string(),
        });
        let project = ProjectData {
            pins: vec![pin],
            background_image: Some("data:image/jpeg;base64,BBBB".to_string()),
            zoom: 2.0,
            offset: Point::new(10.0, -4.0),
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["backgroundImage"], "data:image/jpeg;base64,BBBB");
        assert_eq!(value["zoom"], 2.0);
        assert_eq!(value["offset"]["x"], 10.0);
        assert_eq!(value["pins"][0]["color"], "green");
        assert_eq!(value["pins"][0]["images"][0]["src"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let project: ProjectData = serde_json::from_str("{}").unwrap();
        assert_eq!(project, ProjectData::default());

        let project: ProjectData =
            serde_json::from_str(r#"{"pins":[],"backgroundImage":null}"#).unwrap();
        assert_eq!(project.zoom, 1.0);
        assert_eq!(project.offset, Point::ZERO);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let project: ProjectData = serde_json::from_str(
            r#"{"pins":null,"backgroundImage":null,"zoom":null,"offset":null}"#,
        )
        .unwrap();
        assert_eq!(project, ProjectData::default());

        let project: ProjectData =
            serde_json::from_str(r#"{"pins":[{"id":3,"x":1,"y":2}],"zoom":null,"offset":{"x":4,"y":5}}"#)
                .unwrap();
        assert_eq!(project.pins.len(), 1);
        assert_eq!(project.zoom, 1.0);
        assert_eq!(project.offset, Point::new(4.0, 5.0));
    }
}
