//! Holes embedded in lines.

use crate::error::{PlanError, PlanResult};
use crate::ids::{HoleId, LineId};
use crate::model::{insert_unique, Batch, Category, ElementRef, Hole, Properties};

fn check_offset(offset: f64) -> PlanResult<()> {
    if (0.0..=1.0).contains(&offset) {
        Ok(())
    } else {
        Err(PlanError::ConstraintViolation(format!(
            "hole offset {offset} outside [0, 1]"
        )))
    }
}

impl Batch<'_> {
    /// New hole of `kind` on `line`, at `offset` from the lower endpoint.
    pub fn add_hole(
        &mut self,
        kind: &str,
        line: LineId,
        offset: f64,
        properties: &Properties,
    ) -> PlanResult<HoleId> {
        self.layer.line(line)?;
        check_offset(offset)?;
        let properties = self.factory(Category::Holes, kind, properties)?;
        let id = HoleId(self.acquire_id());
        let hole = Hole {
            id,
            kind: kind.to_string(),
            line,
            offset,
            properties,
            selected: false,
        };
        insert_unique(&mut self.layer.holes, id, hole);
        if let Some(l) = self.layer.lines.get_mut(&line) {
            l.holes.push(id);
        }
        Ok(id)
    }

    pub fn remove_hole(&mut self, id: HoleId) -> PlanResult<()> {
        let line = self.layer.hole(id)?.line;
        if let Some(l) = self.layer.lines.get_mut(&line) {
            l.holes.retain(|&h| h != id);
        }
        self.layer.holes.remove(&id);
        self.layer.selected.remove(ElementRef::Hole(id));
        Ok(())
    }

    /// Move an existing hole to another line, keeping its ID.
    pub(crate) fn rebind_hole(&mut self, id: HoleId, line: LineId, offset: f64) -> PlanResult<()> {
        check_offset(offset)?;
        self.layer.line(line)?;
        let old = self.layer.hole(id)?.line;
        if let Some(l) = self.layer.lines.get_mut(&old) {
            l.holes.retain(|&h| h != id);
        }
        if let Some(hole) = self.layer.holes.get_mut(&id) {
            hole.line = line;
            hole.offset = offset;
        }
        if let Some(l) = self.layer.lines.get_mut(&line) {
            l.holes.push(id);
        }
        Ok(())
    }

    pub(crate) fn set_hole_offset(&mut self, id: HoleId, offset: f64) -> PlanResult<()> {
        check_offset(offset)?;
        let hole = self
            .layer
            .holes
            .get_mut(&id)
            .ok_or_else(|| PlanError::not_found("hole", id))?;
        hole.offset = offset;
        Ok(())
    }
}
