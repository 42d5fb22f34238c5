//! Core design data structures.
//!
//! Defines the arena that flows through legalization: macros (cell masters),
//! cells (instances with a global and a legal position), and groups (cells
//! constrained to a set of regions). The [`Design`] owns all of them; every
//! other component addresses entities through [`CellId`], [`MacroId`], and
//! [`GroupId`].

use crate::error::DesignError;
use crate::ids::{CellId, GroupId, MacroId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tessera_common::{Fingerprint, Point, Rect};

/// The placement database: floorplan, macros, cells, and groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    /// The placeable area, in site/row units.
    pub die: Rect,
    /// All macros.
    pub macros: Vec<Macro>,
    /// All cells.
    pub cells: Vec<Cell>,
    /// All groups.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Auxiliary index: cell name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub cell_by_name: HashMap<String, CellId>,
    /// Auxiliary index: macro name to ID (rebuilt on deserialization).
    #[serde(skip)]
    pub macro_by_name: HashMap<String, MacroId>,
}

impl Design {
    /// Creates an empty design over the given die.
    pub fn new(die: Rect) -> Self {
        Self {
            die,
            macros: Vec::new(),
            cells: Vec::new(),
            groups: Vec::new(),
            cell_by_name: HashMap::new(),
            macro_by_name: HashMap::new(),
        }
    }

    /// Adds a macro and returns its ID.
    pub fn add_macro(&mut self, mut m: Macro) -> MacroId {
        let id = MacroId::from_index(self.macros.len());
        m.id = id;
        self.macro_by_name.insert(m.name.clone(), id);
        self.macros.push(m);
        id
    }

    /// Adds a group and returns its ID.
    pub fn add_group(&mut self, mut group: Group) -> GroupId {
        let id = GroupId::from_index(self.groups.len());
        group.id = id;
        self.groups.push(group);
        id
    }

    /// Adds a cell and returns its ID.
    ///
    /// If the cell names a group, it is appended to that group's siblings, so
    /// groups must be added before their member cells.
    pub fn add_cell(&mut self, mut cell: Cell) -> CellId {
        let id = CellId::from_index(self.cells.len());
        cell.id = id;
        if let Some(group) = cell.group {
            if let Some(g) = self.groups.get_mut(group.index()) {
                g.siblings.push(id);
            }
        }
        self.cell_by_name.insert(cell.name.clone(), id);
        self.cells.push(cell);
        id
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Returns a mutable reference to the cell with the given ID.
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    /// Returns the macro with the given ID.
    pub fn macro_def(&self, id: MacroId) -> &Macro {
        &self.macros[id.index()]
    }

    /// Returns the macro instantiated by a cell.
    pub fn macro_of(&self, cell: CellId) -> &Macro {
        self.macro_def(self.cell(cell).macro_id)
    }

    /// Returns the group with the given ID.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    /// Returns a mutable reference to the group with the given ID.
    pub fn group_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.groups[id.index()]
    }

    /// Looks up a cell by name.
    pub fn cell_named(&self, name: &str) -> Option<CellId> {
        self.cell_by_name.get(name).copied()
    }

    /// Iterates over all cell IDs in arena order.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len() as u32).map(CellId::from_raw)
    }

    /// Iterates over all group IDs in arena order.
    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> {
        (0..self.groups.len() as u32).map(GroupId::from_raw)
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the footprint area of a cell, in sites.
    pub fn cell_area(&self, cell: CellId) -> i64 {
        self.macro_of(cell).area()
    }

    /// Returns the footprint of a cell at its current position.
    pub fn footprint(&self, cell: CellId) -> Rect {
        self.footprint_at(cell, self.cell(cell).pos)
    }

    /// Returns the footprint a cell would have with its origin at `origin`.
    pub fn footprint_at(&self, cell: CellId, origin: Point) -> Rect {
        let m = self.macro_of(cell);
        Rect::from_origin(origin, m.width, m.height)
    }

    /// Returns the region a cell was assigned to, if any.
    pub fn assigned_region(&self, cell: CellId) -> Option<Rect> {
        let c = self.cell(cell);
        let group = self.group(c.group?);
        group.regions.get(c.region?).copied()
    }

    /// Returns whether every movable cell has been placed.
    pub fn is_fully_placed(&self) -> bool {
        self.cells.iter().all(|c| c.fixed || c.is_placed)
    }

    /// Returns the number of placed movable cells.
    pub fn placed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.fixed && c.is_placed)
            .count()
    }

    /// Rebuilds auxiliary indices after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.cell_by_name.clear();
        for (i, cell) in self.cells.iter().enumerate() {
            self.cell_by_name
                .insert(cell.name.clone(), CellId::from_index(i));
        }
        self.macro_by_name.clear();
        for (i, m) in self.macros.iter().enumerate() {
            self.macro_by_name
                .insert(m.name.clone(), MacroId::from_index(i));
        }
    }

    /// Checks the structural consistency of the design.
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.die.is_empty() {
            return Err(DesignError::EmptyDie(self.die));
        }
        for (i, m) in self.macros.iter().enumerate() {
            check_id("macro", i, m.id.as_raw())?;
            if m.width <= 0 || m.height <= 0 {
                return Err(DesignError::EmptyMacro {
                    name: m.name.clone(),
                    width: m.width,
                    height: m.height,
                });
            }
        }

        let mut names = std::collections::HashSet::new();
        for (i, cell) in self.cells.iter().enumerate() {
            check_id("cell", i, cell.id.as_raw())?;
            if !names.insert(cell.name.as_str()) {
                return Err(DesignError::DuplicateCell(cell.name.clone()));
            }
            if cell.macro_id.index() >= self.macros.len() {
                return Err(DesignError::UnknownMacro {
                    cell: cell.name.clone(),
                    macro_id: cell.macro_id,
                });
            }
            if let Some(group) = cell.group {
                let Some(g) = self.groups.get(group.index()) else {
                    return Err(DesignError::UnknownGroup {
                        cell: cell.name.clone(),
                        group,
                    });
                };
                if !g.siblings.contains(&cell.id) {
                    return Err(DesignError::SiblingMismatch {
                        group: g.name.clone(),
                        cell: cell.id,
                    });
                }
            }
        }

        for (i, group) in self.groups.iter().enumerate() {
            check_id("group", i, group.id.as_raw())?;
            for &sibling in &group.siblings {
                let member = self
                    .cells
                    .get(sibling.index())
                    .is_some_and(|c| c.group == Some(group.id));
                if !member {
                    return Err(DesignError::SiblingMismatch {
                        group: group.name.clone(),
                        cell: sibling,
                    });
                }
            }
            for region in &group.regions {
                if !self.die.contains_rect(region) {
                    return Err(DesignError::RegionOutsideDie {
                        group: group.name.clone(),
                        region: *region,
                    });
                }
            }
        }
        Ok(())
    }

    /// Computes a digest of every cell's position and placement state.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut fp = Fingerprint::builder();
        for cell in &self.cells {
            fp.u32(cell.id.as_raw())
                .i32(cell.pos.x)
                .i32(cell.pos.y)
                .flag(cell.is_placed)
                .flag(cell.hold);
        }
        fp.finish()
    }
}

fn check_id(kind: &'static str, index: usize, id: u32) -> Result<(), DesignError> {
    if id as usize != index {
        return Err(DesignError::IdMismatch { kind, index, id });
    }
    Ok(())
}

/// A cell master shared by every instance of a kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Macro {
    /// The macro's ID (assigned by [`Design::add_macro`]).
    pub id: MacroId,
    /// Library name.
    pub name: String,
    /// Width in sites.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
    /// Whether the macro spans more than one placement row.
    pub is_multi: bool,
}

impl Macro {
    /// Creates a macro; the multi-row flag is derived from the height.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            id: MacroId::from_raw(0),
            name: name.into(),
            width,
            height,
            is_multi: height > 1,
        }
    }

    /// Returns the footprint area in sites.
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

/// A placeable cell instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's ID (assigned by [`Design::add_cell`]).
    pub id: CellId,
    /// Instance name.
    pub name: String,
    /// The instantiated macro.
    pub macro_id: MacroId,
    /// Current lower-left position.
    pub pos: Point,
    /// Original global-placement position.
    pub init: Point,
    /// Whether the cell currently holds legal sites.
    #[serde(default)]
    pub is_placed: bool,
    /// Frozen: no later pass may move this cell.
    #[serde(default)]
    pub hold: bool,
    /// Fixed obstacle, never moved.
    #[serde(default)]
    pub fixed: bool,
    /// Group membership.
    #[serde(default)]
    pub group: Option<GroupId>,
    /// Index of the assigned region within the group's regions.
    #[serde(default)]
    pub region: Option<usize>,
    /// Local congestion weight used to order cells of equal area.
    #[serde(default)]
    pub dense_factor: f64,
}

impl Cell {
    /// Creates an unplaced movable cell at its global-placement position.
    pub fn movable(name: impl Into<String>, macro_id: MacroId, init: Point) -> Self {
        Self {
            id: CellId::from_raw(0),
            name: name.into(),
            macro_id,
            pos: init,
            init,
            is_placed: false,
            hold: false,
            fixed: false,
            group: None,
            region: None,
            dense_factor: 0.0,
        }
    }

    /// Creates a fixed, placed cell.
    pub fn fixed(name: impl Into<String>, macro_id: MacroId, at: Point) -> Self {
        Self {
            is_placed: true,
            fixed: true,
            ..Self::movable(name, macro_id, at)
        }
    }

    /// Puts the cell into a group.
    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// Returns whether the cell is a group member.
    pub fn in_any_group(&self) -> bool {
        self.group.is_some()
    }
}

/// A set of cells that must be placed inside the group's regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// The group's ID (assigned by [`Design::add_group`]).
    pub id: GroupId,
    /// Group name (e.g. a power domain).
    pub name: String,
    /// Member cells in insertion order.
    #[serde(default)]
    pub siblings: Vec<CellId>,
    /// Disjoint legal regions.
    pub regions: Vec<Rect>,
    /// Bounding box of all regions (computed by region assignment).
    #[serde(default)]
    pub boundary: Rect,
    /// Sibling area over region area (computed by region assignment).
    #[serde(default)]
    pub util: f64,
}

impl Group {
    /// Creates an empty group over the given regions.
    pub fn new(name: impl Into<String>, regions: Vec<Rect>) -> Self {
        Self {
            id: GroupId::from_raw(0),
            name: name.into(),
            siblings: Vec::new(),
            regions,
            boundary: Rect::default(),
            util: 0.0,
        }
    }
}
