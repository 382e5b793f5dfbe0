//! Scoped mutation batches.
//!
//! `Layer::batch` opens a working copy of the layer, hands it to the caller as
//! a `Batch`, and on success replaces the snapshot with the working copy. On
//! error the working copy is dropped, so partial states of a failed command are
//! never observable. Nested ops (e.g. `remove_line` → `remove_hole`) all run
//! on the same `Batch`.

use std::ops::Deref;

use tracing::debug;

use crate::catalog::ElementFactory;
use crate::error::PlanResult;
use crate::ids::IdGenerator;

use super::layer::Layer;
use super::types::{Category, ElementRef, Properties};

/// Mutable working copy of a layer plus the catalog used to create elements.
///
/// New IDs come from the layer's own counter unless the batch was opened with
/// `Layer::batch_with_ids`.
pub struct Batch<'c> {
    pub(crate) layer: Layer,
    catalog: &'c dyn ElementFactory,
    ids: Option<&'c mut dyn IdGenerator>,
}

impl Deref for Batch<'_> {
    type Target = Layer;
    fn deref(&self) -> &Layer {
        &self.layer
    }
}

impl Layer {
    /// Run `f` on a working copy; commit on `Ok`, discard on `Err`.
    pub fn batch<'c, T>(
        &mut self,
        catalog: &'c dyn ElementFactory,
        f: impl FnOnce(&mut Batch<'c>) -> PlanResult<T>,
    ) -> PlanResult<T> {
        self.run_batch(catalog, None, f)
    }

    /// `batch` with IDs drawn from an external generator.
    ///
    /// The generator must not hand out IDs already used in this layer; the
    /// layer's own counter is kept above every ID it returns.
    pub fn batch_with_ids<'c, T>(
        &mut self,
        catalog: &'c dyn ElementFactory,
        ids: &'c mut dyn IdGenerator,
        f: impl FnOnce(&mut Batch<'c>) -> PlanResult<T>,
    ) -> PlanResult<T> {
        self.run_batch(catalog, Some(ids), f)
    }

    fn run_batch<'c, T>(
        &mut self,
        catalog: &'c dyn ElementFactory,
        ids: Option<&'c mut dyn IdGenerator>,
        f: impl FnOnce(&mut Batch<'c>) -> PlanResult<T>,
    ) -> PlanResult<T> {
        let mut batch = Batch {
            layer: self.clone(),
            catalog,
            ids,
        };
        match f(&mut batch) {
            Ok(out) => {
                *self = batch.commit();
                Ok(out)
            }
            Err(err) => {
                debug!(layer = %self.id, error = %err, "batch discarded");
                Err(err)
            }
        }
    }
}

impl<'c> Batch<'c> {
    /// Finalize the working copy: vertices nobody references are dropped.
    fn commit(mut self) -> Layer {
        let orphans: Vec<_> = self
            .layer
            .vertices
            .values()
            .filter(|v| v.is_orphan())
            .map(|v| v.id)
            .collect();
        for id in &orphans {
            self.layer.vertices.remove(id);
            self.layer.selected.remove(ElementRef::Vertex(*id));
        }
        debug!(
            layer = %self.layer.id,
            purged = orphans.len(),
            vertices = self.layer.vertices.len(),
            lines = self.layer.lines.len(),
            areas = self.layer.areas.len(),
            "batch committed"
        );
        self.layer
    }

    pub(crate) fn acquire_id(&mut self) -> u64 {
        match self.ids.as_mut() {
            Some(ids) => {
                let id = ids.acquire_id();
                self.layer.ids.reserve_above(id);
                id
            }
            None => self.layer.ids.acquire_id(),
        }
    }

    /// Catalog defaults for a new element, merged with `overrides`.
    pub(crate) fn factory(
        &self,
        category: Category,
        kind: &str,
        overrides: &Properties,
    ) -> PlanResult<Properties> {
        self.catalog.factory_element(category, kind, overrides)
    }
}

/// Insert into an ID-keyed map; a reused ID breaks the model and is fatal.
pub(crate) fn insert_unique<K, V>(map: &mut std::collections::BTreeMap<K, V>, key: K, value: V)
where
    K: Ord + Copy + std::fmt::Display,
{
    if map.insert(key, value).is_some() {
        panic!("ID generator handed out {key} twice");
    }
}
