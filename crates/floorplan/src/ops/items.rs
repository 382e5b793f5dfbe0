//! Free-standing items.

use crate::error::PlanResult;
use crate::geometry::Point;
use crate::ids::ItemId;
use crate::model::{insert_unique, Batch, Category, ElementRef, Item, Properties};

impl Batch<'_> {
    /// New item of `kind` centred at `at`; rotation in degrees.
    pub fn add_item(
        &mut self,
        kind: &str,
        at: Point,
        width: f64,
        height: f64,
        rotation: f64,
        properties: &Properties,
    ) -> PlanResult<ItemId> {
        let properties = self.factory(Category::Items, kind, properties)?;
        let id = ItemId(self.acquire_id());
        let item = Item {
            id,
            kind: kind.to_string(),
            x: at.x,
            y: at.y,
            width,
            height,
            rotation,
            properties,
            selected: false,
        };
        insert_unique(&mut self.layer.items, id, item);
        Ok(id)
    }

    pub fn remove_item(&mut self, id: ItemId) -> PlanResult<()> {
        self.layer.item(id)?;
        self.layer.items.remove(&id);
        self.layer.selected.remove(ElementRef::Item(id));
        Ok(())
    }
}
