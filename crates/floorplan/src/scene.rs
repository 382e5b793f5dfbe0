//! A floor plan: ordered layers, one of them selected, plus JSON persistence.
//!
//! Loading validates every layer and re-seeds each layer's ID generator above
//! the largest ID in use, so edits after a load never collide with stored IDs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlanError, PlanResult};
use crate::ids::{IdGenerator, LayerId, SequentialIds};
use crate::model::Layer;

fn default_unit() -> String {
    "cm".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_unit")]
    pub unit: String,
    layers: BTreeMap<LayerId, Layer>,
    selected_layer: LayerId,
    #[serde(default)]
    layer_ids: SequentialIds,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// One empty, selected layer named `layer-1`.
    pub fn new() -> Self {
        let mut layer_ids = SequentialIds::default();
        layer_ids.reserve_above(0);
        let id = LayerId(layer_ids.acquire_id());
        let mut layers = BTreeMap::new();
        layers.insert(id, Layer::new(id, id.to_string()));
        Self {
            unit: default_unit(),
            layers,
            selected_layer: id,
            layer_ids,
        }
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.values()
    }

    pub fn layer(&self, id: LayerId) -> PlanResult<&Layer> {
        self.layers
            .get(&id)
            .ok_or_else(|| PlanError::not_found("layer", id))
    }

    pub fn layer_mut(&mut self, id: LayerId) -> PlanResult<&mut Layer> {
        self.layers
            .get_mut(&id)
            .ok_or_else(|| PlanError::not_found("layer", id))
    }

    pub fn selected_layer_id(&self) -> LayerId {
        self.selected_layer
    }

    pub fn selected_layer(&self) -> &Layer {
        &self.layers[&self.selected_layer]
    }

    pub fn selected_layer_mut(&mut self) -> &mut Layer {
        let id = self.selected_layer;
        self.layers
            .get_mut(&id)
            .unwrap_or_else(|| unreachable!("selected layer {id} is always present"))
    }

    /// Add an empty layer and select it.
    pub fn add_layer(&mut self, name: Option<&str>) -> LayerId {
        let id = LayerId(self.layer_ids.acquire_id());
        let name = name.map_or_else(|| id.to_string(), str::to_string);
        self.layers.insert(id, Layer::new(id, name));
        self.selected_layer = id;
        debug!(layer = %id, "layer added");
        id
    }

    pub fn select_layer(&mut self, id: LayerId) -> PlanResult<()> {
        self.layer(id)?;
        self.selected_layer = id;
        Ok(())
    }

    /// Remove a layer; the last remaining layer cannot be removed.
    pub fn remove_layer(&mut self, id: LayerId) -> PlanResult<Layer> {
        self.layer(id)?;
        if self.layers.len() == 1 {
            return Err(PlanError::ConstraintViolation(
                "a scene keeps at least one layer".to_string(),
            ));
        }
        let removed = self
            .layers
            .remove(&id)
            .ok_or_else(|| PlanError::not_found("layer", id))?;
        if self.selected_layer == id {
            if let Some(&first) = self.layers.keys().next() {
                self.selected_layer = first;
            }
        }
        Ok(removed)
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> PlanResult<()> {
        self.layer_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn set_layer_visibility(&mut self, id: LayerId, visible: bool) -> PlanResult<()> {
        self.layer_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: f64) -> PlanResult<()> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(PlanError::ConstraintViolation(format!(
                "layer opacity {opacity} outside [0, 1]"
            )));
        }
        self.layer_mut(id)?.opacity = opacity;
        Ok(())
    }

    pub fn to_json(&self) -> PlanResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::Persistence(e.to_string()))
    }

    /// Decode and validate a stored scene.
    pub fn from_json(text: &str) -> PlanResult<Self> {
        let mut scene: Scene =
            serde_json::from_str(text).map_err(|e| PlanError::Persistence(e.to_string()))?;
        if !scene.layers.contains_key(&scene.selected_layer) {
            return Err(PlanError::Persistence(format!(
                "selected layer {} is missing",
                scene.selected_layer
            )));
        }
        let mut top_layer = 0;
        for (key, layer) in scene.layers.iter_mut() {
            if *key != layer.id {
                return Err(PlanError::Persistence(format!(
                    "layer stored under {key} claims id {}",
                    layer.id
                )));
            }
            let report = layer.validate();
            if let Some(first) = report.errors.first() {
                warn!(layer = %key, errors = report.errors.len(), "stored layer is inconsistent");
                return Err(PlanError::Persistence(format!(
                    "layer {key}: {first} ({} problem(s))",
                    report.errors.len()
                )));
            }
            if let Some(max) = layer.max_id() {
                layer.ids.reserve_above(max);
            }
            top_layer = top_layer.max(key.0);
        }
        scene.layer_ids.reserve_above(top_layer);
        Ok(scene)
    }
}
