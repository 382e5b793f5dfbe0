//! Element catalog: default property schemas keyed by type name.
//!
//! The core never hard-codes type-specific defaults. Every created line, hole,
//! area or item asks an `ElementFactory` for its properties, passing the
//! caller's overrides.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::{PlanError, PlanResult};
use crate::model::{Category, Properties};

/// Capability the mutation ops need from a catalog.
pub trait ElementFactory {
    /// Default properties of `kind` merged with `overrides` (overrides win).
    fn factory_element(
        &self,
        category: Category,
        kind: &str,
        overrides: &Properties,
    ) -> PlanResult<Properties>;
}

/// Registered element type.
#[derive(Clone, Debug, PartialEq)]
pub struct Prototype {
    pub category: Category,
    pub properties: Properties,
}

/// Registry of prototypes keyed by type name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    prototypes: BTreeMap<String, Prototype>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a type.
    pub fn register(&mut self, kind: &str, category: Category, properties: Value) -> &mut Self {
        self.prototypes.insert(
            kind.to_string(),
            Prototype {
                category,
                properties: into_properties(properties),
            },
        );
        self
    }

    pub fn get(&self, kind: &str) -> Option<&Prototype> {
        self.prototypes.get(kind)
    }

    /// Type names registered for `category`.
    pub fn kinds(&self, category: Category) -> impl Iterator<Item = &str> + '_ {
        self.prototypes
            .iter()
            .filter(move |(_, p)| p.category == category)
            .map(|(k, _)| k.as_str())
    }

    /// Built-in walls, openings, rooms and a few furniture items (units: cm).
    pub fn standard() -> Self {
        let mut c = Self::new();
        c.register(
            "wall",
            Category::Lines,
            json!({"height": 300.0, "thickness": 20.0, "textureA": "bricks", "textureB": "bricks"}),
        )
        .register(
            "door",
            Category::Holes,
            json!({"width": 80.0, "height": 215.0, "altitude": 0.0, "thickness": 30.0, "flip": false}),
        )
        .register(
            "window",
            Category::Holes,
            json!({"width": 90.0, "height": 100.0, "altitude": 90.0, "thickness": 10.0}),
        )
        .register(
            "area",
            Category::Areas,
            json!({"patternColor": "#F5F4F4", "thickness": 0.0, "texture": "none"}),
        )
        .register(
            "table",
            Category::Items,
            json!({"altitude": 0.0, "color": "#8B5A2B"}),
        )
        .register("sofa", Category::Items, json!({"altitude": 0.0, "seats": 3}))
        .register(
            "wardrobe",
            Category::Items,
            json!({"altitude": 0.0, "doors": 2}),
        );
        c
    }
}

impl ElementFactory for Catalog {
    fn factory_element(
        &self,
        category: Category,
        kind: &str,
        overrides: &Properties,
    ) -> PlanResult<Properties> {
        let proto = self
            .prototypes
            .get(kind)
            .filter(|p| p.category == category)
            .ok_or_else(|| PlanError::UnknownType {
                category,
                kind: kind.to_string(),
            })?;
        let mut props = proto.properties.clone();
        for (k, v) in overrides {
            props.insert(k.clone(), v.clone());
        }
        Ok(props)
    }
}

/// Object values become property maps; anything else is an empty map.
pub fn into_properties(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}
