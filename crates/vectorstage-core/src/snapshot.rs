//! Serializable summary of a stage.

use crate::geometry::{Matrix, Rectangle, Transformable};
use crate::layer::{Layer, LayerId};
use crate::objects::{LayerObject, ObjectId, ObjectKind};
use crate::trbox::{TrBox, TrBoxState};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One object as seen from outside the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub visible: bool,
    pub matrix: Matrix,
    pub bounds: Option<Rectangle>,
}

impl From<&LayerObject> for ObjectSnapshot {
    fn from(obj: &LayerObject) -> Self {
        Self {
            id: obj.id(),
            name: obj.name().to_string(),
            kind: obj.kind(),
            visible: obj.visible(),
            matrix: *obj.matrix(),
            bounds: obj.bound_rect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub id: LayerId,
    pub name: String,
    pub fps: u32,
    pub frames_drawn: u64,
    pub objects: Vec<ObjectSnapshot>,
}

impl From<&Layer> for LayerSnapshot {
    fn from(layer: &Layer) -> Self {
        Self {
            id: layer.id(),
            name: layer.name.clone(),
            fps: layer.fps(),
            frames_drawn: layer.frames_drawn(),
            objects: layer.objects().map(ObjectSnapshot::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrBoxSnapshot {
    pub state: TrBoxState,
    pub selected: Option<ObjectId>,
    pub points: Vec<Point>,
}

impl From<&TrBox> for TrBoxSnapshot {
    fn from(tr: &TrBox) -> Self {
        Self {
            state: tr.state(),
            selected: tr.selected(),
            points: tr.points().to_vec(),
        }
    }
}

/// Layers bottom to top, plus the transform box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<LayerSnapshot>,
    pub tr_box: TrBoxSnapshot,
}

impl SceneSnapshot {
    /// Find an object by name across all layers.
    pub fn object_named(&self, name: &str) -> Option<&ObjectSnapshot> {
        self.layers
            .iter()
            .flat_map(|l| &l.objects)
            .find(|o| o.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
