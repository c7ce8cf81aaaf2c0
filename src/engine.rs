//! Interaction controller tying the document, index, camera and gestures together.
//!
//! `EngineCore` is constructed explicitly and owns everything it touches;
//! there is no process-wide index or store. Pointer handlers take
//! screen-space input, convert through the camera, and return [`Action`]s
//! for the host to carry out.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{Camera, Point};
use crate::config::BoardConfig;
use crate::doc::{Element, ElementId, ElementStore, ElementUpdate, PartialElement};
use crate::grid::{GridSettings, snap_point_to_grid};
use crate::handles::{HandleType, apply_resize, find_resize_handle, resize_cursor};
use crate::hit::spatial_hit_test;
use crate::input::{InputState, Modifiers};
use crate::rotate::{apply_rotation, swept_angle};
use crate::selection::{
    BoundingBox, apply_group_resize, apply_group_rotation, apply_multi_selection_resize, expand_to_groups,
    find_multi_selection_handle, multi_selection_bounds,
};
use crate::spatial::SpatialIndex;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Elements changed; the host persists or broadcasts these.
    ElementsUpdated(Vec<ElementUpdate>),
    SelectionChanged(Vec<ElementId>),
    SetCursor(&'static str),
    RenderNeeded,
}

/// Core engine state: document, spatial index, viewport, grid, selection and
/// the active gesture.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub store: ElementStore,
    pub index: SpatialIndex,
    pub camera: Camera,
    pub grid: GridSettings,
    pub input: InputState,
    selected: Vec<ElementId>,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self { index: SpatialIndex::new(config.index), grid: config.grid.clone(), ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the document and rebuild the index. Selected ids that no
    /// longer exist are dropped and any gesture is abandoned.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.store.load_snapshot(elements);
        self.index.rebuild(self.store.sorted_elements());
        let store = &self.store;
        self.selected.retain(|id| store.get(id).is_some());
        self.input = InputState::Idle;
    }

    /// Add (or replace) an element.
    pub fn apply_create(&mut self, element: Element) {
        self.index.update(&element);
        self.store.insert(element);
    }

    /// Merge a partial update. Returns false if the id is unknown.
    pub fn apply_update(&mut self, id: &str, fields: &PartialElement) -> bool {
        if !self.store.apply_partial(id, fields) {
            return false;
        }
        if let Some(element) = self.store.get(id) {
            self.index.update(element);
        }
        true
    }

    /// Delete an element. Returns false if the id is unknown.
    pub fn apply_delete(&mut self, id: &str) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        self.index.remove(id);
        self.selected.retain(|s| s != id);
        true
    }

    // --- Selection ---

    /// Select `ids`, widened to whole groups. Unknown and locked ids are dropped.
    pub fn select(&mut self, ids: &[ElementId]) -> Action {
        self.selected = expand_to_groups(ids, self.store.sorted_elements()).into_iter().map(|el| el.id.clone()).collect();
        Action::SelectionChanged(self.selected.clone())
    }

    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        &self.selected
    }

    /// Live selected elements, in selection order.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selected.iter().filter_map(|id| self.store.get(id)).collect()
    }

    /// Bounds of the current selection, or `None` when nothing is selected.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<BoundingBox> {
        multi_selection_bounds(self.selected_elements())
    }

    // --- Pointer input ---

    /// Start a gesture on a handle, or change the selection.
    pub fn on_pointer_down(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_active() {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);

        if let Some(cursor) = self.begin_handle_gesture(world) {
            tracing::debug!(gesture = self.input.name(), elements = self.input.originals().len(), "gesture started");
            return vec![Action::SetCursor(cursor), Action::RenderNeeded];
        }

        let hit = spatial_hit_test(&self.index, world, |id| self.store.get(id)).map(|el| el.id.clone());
        match hit {
            Some(id) if modifiers.shift => {
                let mut ids = self.selected.clone();
                if let Some(pos) = ids.iter().position(|s| *s == id) {
                    ids.remove(pos);
                } else {
                    ids.push(id);
                }
                vec![self.select(&ids), Action::RenderNeeded]
            }
            Some(id) => vec![self.select(&[id]), Action::RenderNeeded],
            None if self.selected.is_empty() => vec![Action::None],
            None => {
                self.selected.clear();
                vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded]
            }
        }
    }

    /// Advance the active gesture. Positions snap to the grid unless alt is held.
    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        let grid = &self.grid;
        let snap = |p: Point| snap_point_to_grid(p, grid);
        let snap: Option<&dyn Fn(Point) -> Point> = if modifiers.alt { None } else { Some(&snap) };
        let target = snap.map_or(world, |f| f(world));

        let updates = match &self.input {
            InputState::Idle => return Vec::new(),
            InputState::Resizing { handle, start_world, original } => {
                let fields = apply_resize(original, *handle, world, *start_world, Some(original.bounds()), snap);
                vec![ElementUpdate { id: original.id.clone(), fields }]
            }
            InputState::Rotating { original } => {
                vec![ElementUpdate { id: original.id.clone(), fields: apply_rotation(original, world, None) }]
            }
            InputState::GroupResizing { handle, start_world, original_bounds, originals } => {
                let bounds = apply_multi_selection_resize(original_bounds, *handle, *start_world, target);
                let members: Vec<&Element> = originals.iter().collect();
                apply_group_resize(&members, original_bounds, &bounds)
            }
            InputState::GroupRotating { pivot, start_world, originals } => {
                let delta = swept_angle(*pivot, *start_world, world);
                let members: Vec<&Element> = originals.iter().collect();
                apply_group_rotation(&members, *pivot, delta)
            }
        };

        self.apply_updates(&updates);
        vec![Action::ElementsUpdated(updates), Action::RenderNeeded]
    }

    /// Finish the active gesture, keeping its last update.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_active() {
            return Vec::new();
        }
        tracing::debug!(gesture = self.input.name(), "gesture finished");
        self.input = InputState::Idle;
        vec![Action::SetCursor("default"), Action::RenderNeeded]
    }

    /// Abort the active gesture and put every affected element back the way it was.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        if !state.is_active() {
            return Vec::new();
        }
        tracing::debug!(gesture = state.name(), "gesture cancelled");
        let updates: Vec<ElementUpdate> = state
            .originals()
            .iter()
            .map(|el| ElementUpdate {
                id: el.id.clone(),
                fields: PartialElement {
                    x: Some(el.x),
                    y: Some(el.y),
                    width: Some(el.width),
                    height: Some(el.height),
                    angle: Some(el.angle),
                    ..Default::default()
                },
            })
            .collect();
        self.apply_updates(&updates);
        vec![Action::ElementsUpdated(updates), Action::SetCursor("default"), Action::RenderNeeded]
    }

    // --- Internal ---

    /// Enter a handle gesture if `world` is on a handle of the current
    /// selection. Returns the cursor to show.
    fn begin_handle_gesture(&mut self, world: Point) -> Option<&'static str> {
        match self.selected.as_slice() {
            [] => None,
            [id] => {
                let original = self.store.get(id).filter(|el| !el.locked)?.clone();
                let handle = find_resize_handle(world, &original)?;
                self.input = if handle == HandleType::Rotation {
                    InputState::Rotating { original }
                } else {
                    InputState::Resizing { handle, start_world: world, original }
                };
                Some(resize_cursor(handle))
            }
            _ => {
                let bounds = self.selection_bounds()?;
                let handle = find_multi_selection_handle(world, &bounds)?;
                let originals: Vec<Element> = self.selected_elements().into_iter().cloned().collect();
                self.input = if handle == HandleType::Rotation {
                    InputState::GroupRotating { pivot: bounds.center, start_world: world, originals }
                } else {
                    InputState::GroupResizing { handle, start_world: world, original_bounds: bounds, originals }
                };
                Some(resize_cursor(handle))
            }
        }
    }

    fn apply_updates(&mut self, updates: &[ElementUpdate]) {
        for update in updates {
            self.apply_update(&update.id, &update.fields);
        }
    }
}
