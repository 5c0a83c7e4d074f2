//! Click zone management for mouse interaction.
//!
//! Zones are registered during each render pass and looked up when a mouse
//! event arrives, so hit-testing always matches what is on screen:
//!
//! 1. `registry.clear()` at the start of the frame
//! 2. each field registers its bounds (popups with a higher z-order)
//! 3. `registry.find(x, y)` on press or move

use ratatui::layout::Rect;

use crate::app::Field;

/// Z-order of small affordances drawn inside a field.
pub const Z_AFFORDANCE: u8 = 5;
/// Z-order of a popup panel's frame.
pub const Z_PANEL: u8 = 9;
/// Z-order of the rows inside a popup panel.
pub const Z_PANEL_ROW: u8 = 10;

/// What a click zone stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneId {
    /// The body of a form field.
    Field(Field),
    /// `◀` of the country field.
    CountryPrev,
    /// `▶` of the country field.
    CountryNext,
    /// `✕` inside a combobox input.
    ComboClear(Field),
    /// Open combobox panel (frame and empty space).
    ComboPanel(Field),
    /// Option row, by position in the filtered list.
    ComboRow(Field, usize),
    /// Selected-category chip, by position in the selection.
    Chip(usize),
    /// Open category panel.
    CategoryPanel,
    /// Checkbox row, by index into the category options.
    CategoryRow(usize),
}

/// A clickable zone with bounds and priority.
#[derive(Debug, Clone)]
pub struct ClickZone {
    pub id: ZoneId,
    pub rect: Rect,
    /// Higher is on top.
    pub z_order: u8,
}

impl ClickZone {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Registry of click zones, repopulated every frame.
#[derive(Debug, Default)]
pub struct ClickZoneRegistry {
    zones: Vec<ClickZone>,
    needs_sort: bool,
}

impl ClickZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: Vec::with_capacity(32),
            needs_sort: false,
        }
    }

    /// Clear all zones (start of each render).
    pub fn clear(&mut self) {
        self.zones.clear();
        self.needs_sort = false;
    }

    /// Register a zone at z-order 0. Empty rectangles are ignored.
    pub fn register(&mut self, id: ZoneId, rect: Rect) {
        self.register_with_z_order(id, rect, 0);
    }

    pub fn register_with_z_order(&mut self, id: ZoneId, rect: Rect, z_order: u8) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.zones.push(ClickZone { id, rect, z_order });
        if z_order > 0 {
            self.needs_sort = true;
        }
    }

    /// Topmost zone at the given position.
    pub fn find(&mut self, x: u16, y: u16) -> Option<ZoneId> {
        if self.needs_sort {
            // Stable sort keeps registration order among equal z-orders.
            self.zones.sort_by(|a, b| b.z_order.cmp(&a.z_order));
            self.needs_sort = false;
        }
        self.zones.iter().find(|z| z.contains(x, y)).map(|z| z.id)
    }

    pub fn get_zone_rect(&self, id: ZoneId) -> Option<Rect> {
        self.zones.iter().find(|z| z.id == id).map(|z| z.rect)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
