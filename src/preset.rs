//! Preset catalog: default geometry, name and colour per `(kind, preset)`.
//!
//! The catalog is configuration rather than logic. [`PresetCatalog::builtin`]
//! carries the stock shapes; hosts that ship their own table load it with
//! [`PresetCatalog::from_json`].

#[cfg(test)]
#[path = "preset_test.rs"]
mod preset_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::consts::{DEFAULT_BORDER_COLOR, DEFAULT_TEXT_COLOR};
use crate::doc::{Attachment, DoorSwing, FloorObject, ObjectKind};
use crate::geom::Point;

/// Error returned when loading a preset table.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("invalid preset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind:?} preset `{name}` has {count} points, need at least 3")]
    TooFewPoints { kind: ObjectKind, name: String, count: usize },
}

/// Default geometry and style for one preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Local polygon, origin at the top-left.
    pub points: Vec<Point>,
    pub default_width: f64,
    pub default_name: String,
    pub default_color: String,
}

impl Preset {
    /// A fresh detached object of `kind` built from this preset with its
    /// origin at `(x, y)`.
    #[must_use]
    pub fn instantiate(&self, kind: ObjectKind, x: f64, y: f64) -> FloorObject {
        FloorObject {
            id: Uuid::new_v4(),
            kind,
            name: self.default_name.clone(),
            x,
            y,
            points: self.points.clone(),
            color: self.default_color.clone(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            rotation: 0.0,
            width: self.default_width,
            attachment: Attachment::Detached,
            swing: DoorSwing::default(),
        }
    }
}

/// One row of a serialized preset table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetEntry {
    pub kind: ObjectKind,
    pub name: String,
    #[serde(flatten)]
    pub preset: Preset,
}

/// Lookup table from `(kind, preset name)` to [`Preset`].
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    entries: HashMap<(ObjectKind, String), Preset>,
}

fn rect(w: f64, h: f64) -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w, h), Point::new(0.0, h)]
}

fn poly(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

impl PresetCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock rooms, doors, windows and furniture.
    #[must_use]
    pub fn builtin() -> Self {
        const ROOM: &str = "#E2E8F0";
        const DOOR: &str = "#8B4513";
        const WINDOW: &str = "#87CEEB";
        const FURNITURE: &str = "#DEB887";

        let mut catalog = Self::new();
        let mut add = |kind, name: &str, points: Vec<Point>, label: &str, color: &str| {
            let default_width = crate::geom::bounding_box(&points).map_or(0.0, |b| b.width());
            catalog.insert(
                kind,
                name,
                Preset {
                    points,
                    default_width,
                    default_name: label.to_string(),
                    default_color: color.to_string(),
                },
            );
        };

        add(ObjectKind::Room, "square", rect(200.0, 200.0), "Square room", ROOM);
        add(
            ObjectKind::Room,
            "l-shape",
            poly(&[(0.0, 0.0), (200.0, 0.0), (200.0, 100.0), (100.0, 100.0), (100.0, 200.0), (0.0, 200.0)]),
            "L-shaped room",
            ROOM,
        );
        add(
            ObjectKind::Room,
            "t-shape",
            poly(&[
                (0.0, 0.0),
                (200.0, 0.0),
                (200.0, 100.0),
                (150.0, 100.0),
                (150.0, 200.0),
                (50.0, 200.0),
                (50.0, 100.0),
                (0.0, 100.0),
            ]),
            "T-shaped room",
            ROOM,
        );

        add(ObjectKind::Door, "single", rect(80.0, 10.0), "Single door", DOOR);
        add(ObjectKind::Door, "double", rect(160.0, 10.0), "Double door", DOOR);
        add(ObjectKind::Door, "sliding", rect(120.0, 10.0), "Sliding door", DOOR);

        add(ObjectKind::Window, "small", rect(60.0, 8.0), "Small window", WINDOW);
        add(ObjectKind::Window, "medium", rect(100.0, 8.0), "Medium window", WINDOW);
        add(ObjectKind::Window, "large", rect(150.0, 8.0), "Large window", WINDOW);

        add(ObjectKind::Furniture, "sofa", rect(180.0, 80.0), "Sofa", FURNITURE);
        add(ObjectKind::Furniture, "bed", rect(150.0, 200.0), "Bed", FURNITURE);
        add(ObjectKind::Furniture, "table", rect(120.0, 80.0), "Table", FURNITURE);
        add(ObjectKind::Furniture, "chair", rect(50.0, 50.0), "Chair", FURNITURE);

        catalog
    }

    /// Load a catalog from a JSON array of [`PresetEntry`] rows.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and `TooFewPoints` for a polygon
    /// with fewer than three vertices.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let rows: Vec<PresetEntry> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for row in rows {
            if row.preset.points.len() < 3 {
                return Err(PresetError::TooFewPoints {
                    kind: row.kind,
                    count: row.preset.points.len(),
                    name: row.name,
                });
            }
            catalog.entries.insert((row.kind, row.name), row.preset);
        }
        Ok(catalog)
    }

    /// Add or replace a preset.
    pub fn insert(&mut self, kind: ObjectKind, name: &str, preset: Preset) {
        self.entries.insert((kind, name.to_string()), preset);
    }

    #[must_use]
    pub fn get(&self, kind: ObjectKind, name: &str) -> Option<&Preset> {
        self.entries.get(&(kind, name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows sorted by kind order then name, ready for serialization.
    #[must_use]
    pub fn entries(&self) -> Vec<PresetEntry> {
        let mut rows: Vec<PresetEntry> = self
            .entries
            .iter()
            .map(|((kind, name), preset)| PresetEntry { kind: *kind, name: name.clone(), preset: preset.clone() })
            .collect();
        rows.sort_by(|a, b| kind_rank(a.kind).cmp(&kind_rank(b.kind)).then_with(|| a.name.cmp(&b.name)));
        rows
    }
}

fn kind_rank(kind: ObjectKind) -> u8 {
    match kind {
        ObjectKind::Room => 0,
        ObjectKind::Door => 1,
        ObjectKind::Window => 2,
        ObjectKind::Furniture => 3,
    }
}
