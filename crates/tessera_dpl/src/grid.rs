//! Site-grid placement surface.
//!
//! [`SiteGrid`] tracks which cell occupies each site of the die and answers
//! the legality queries the legalizer needs. A position is legal for a cell
//! when its footprint lies inside the die, every covered site is free (or
//! already held by the same cell), and the footprint respects group
//! constraints: group members must sit fully inside one of their group's
//! regions, all other cells must stay clear of every group region.
//!
//! Searches visit candidate origins in rings of increasing Manhattan distance
//! from the target, so the first legal origin found is also the closest.

use crate::data::Design;
use crate::error::DesignError;
use crate::ids::CellId;
use crate::legalize::distance::cell_anchor;
use crate::surface::{PlacementSurface, RegionAssigner};
use tessera_common::{Point, Rect};
use tessera_config::SurfaceConfig;

/// Row-major site occupancy over the die.
#[derive(Debug, Clone)]
pub struct SiteGrid {
    die: Rect,
    sites: Vec<Option<CellId>>,
    search_radius: i32,
}

impl SiteGrid {
    /// Builds the grid and registers every fixed or already placed cell.
    ///
    /// Fixed cells are clipped to the die. Placed movable cells must lie inside
    /// the die, and no two registered cells may share a site.
    pub fn new(design: &Design, config: &SurfaceConfig) -> Result<Self, DesignError> {
        let die = design.die;
        let mut grid = Self {
            die,
            sites: vec![None; die.area() as usize],
            search_radius: config.search_radius,
        };

        for cell in design.cell_ids() {
            let c = design.cell(cell);
            if !(c.fixed || c.is_placed) {
                continue;
            }
            let footprint = design.footprint(cell);
            if !c.fixed && !die.contains_rect(&footprint) {
                return Err(DesignError::PreplacedOutsideDie(c.name.clone()));
            }
            for site in grid.sites_of(&footprint) {
                if let Some(other) = grid.sites[site] {
                    return Err(DesignError::PreplacedOverlap {
                        cell: c.name.clone(),
                        other: design.cell(other).name.clone(),
                    });
                }
                grid.sites[site] = Some(cell);
            }
        }
        Ok(grid)
    }

    /// Returns the die this grid covers.
    pub fn die(&self) -> Rect {
        self.die
    }

    /// Returns the cell occupying the site at `p`, if any.
    pub fn occupant(&self, p: Point) -> Option<CellId> {
        self.index(p).and_then(|i| self.sites[i])
    }

    /// Returns the number of occupied sites.
    pub fn occupied_sites(&self) -> usize {
        self.sites.iter().filter(|s| s.is_some()).count()
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.die.contains_point(p) {
            return None;
        }
        let width = self.die.width() as usize;
        let col = (p.x - self.die.x_min) as usize;
        let row = (p.y - self.die.y_min) as usize;
        Some(row * width + col)
    }

    /// Site indices covered by `rect`, clipped to the die.
    fn sites_of(&self, rect: &Rect) -> Vec<usize> {
        let x_lo = rect.x_min.max(self.die.x_min);
        let x_hi = rect.x_max.min(self.die.x_max);
        let y_lo = rect.y_min.max(self.die.y_min);
        let y_hi = rect.y_max.min(self.die.y_max);
        let mut out = Vec::new();
        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                if let Some(i) = self.index(Point::new(x, y)) {
                    out.push(i);
                }
            }
        }
        out
    }

    /// Whether a footprint respects the die and the cell's group constraints.
    fn region_ok(&self, design: &Design, cell: CellId, footprint: &Rect) -> bool {
        if !self.die.contains_rect(footprint) {
            return false;
        }
        match design.cell(cell).group {
            Some(group) => design
                .group(group)
                .regions
                .iter()
                .any(|r| r.contains_rect(footprint)),
            None => !design
                .groups
                .iter()
                .flat_map(|g| g.regions.iter())
                .any(|r| r.overlaps(footprint)),
        }
    }

    fn is_legal(&self, design: &Design, cell: CellId, origin: Point) -> bool {
        let footprint = design.footprint_at(cell, origin);
        if !self.region_ok(design, cell, &footprint) {
            return false;
        }
        self.sites_of(&footprint)
            .into_iter()
            .all(|i| self.sites[i].map_or(true, |occupant| occupant == cell))
    }

    /// Finds the legal origin nearest to `target` within `radius`.
    fn search(&self, design: &Design, cell: CellId, target: Point, radius: i32) -> Option<Point> {
        let m = design.macro_of(cell);
        if m.width > self.die.width() || m.height > self.die.height() {
            return None;
        }
        let center = Point::new(
            target
                .x
                .clamp(self.die.x_min, self.die.x_max - m.width),
            target
                .y
                .clamp(self.die.y_min, self.die.y_max - m.height),
        );
        for d in 0..=radius {
            for dy in -d..=d {
                let rem = d - dy.abs();
                let dxs = [-rem, rem];
                let dxs = if rem == 0 { &dxs[1..] } else { &dxs[..] };
                for &dx in dxs {
                    let origin = Point::new(center.x + dx, center.y + dy);
                    if self.is_legal(design, cell, origin) {
                        return Some(origin);
                    }
                }
            }
        }
        None
    }

    fn occupy(&mut self, design: &mut Design, cell: CellId, origin: Point) {
        let footprint = design.footprint_at(cell, origin);
        for i in self.sites_of(&footprint) {
            self.sites[i] = Some(cell);
        }
        let c = design.cell_mut(cell);
        c.pos = origin;
        c.is_placed = true;
    }

    fn release(&mut self, design: &Design, cell: CellId) {
        for i in self.sites_of(&design.footprint(cell)) {
            if self.sites[i] == Some(cell) {
                self.sites[i] = None;
            }
        }
    }

    fn movable(design: &Design, cell: CellId) -> bool {
        let c = design.cell(cell);
        !(c.fixed || c.hold)
    }

    /// Lifts a cell, searches, and commits the result or restores the cell.
    fn relocate(&mut self, design: &mut Design, cell: CellId, target: Point, radius: i32) -> bool {
        if !Self::movable(design, cell) {
            return false;
        }
        let was_placed = design.cell(cell).is_placed;
        if was_placed {
            self.release(design, cell);
        }
        match self.search(design, cell, target, radius) {
            Some(origin) => {
                self.occupy(design, cell, origin);
                true
            }
            None => {
                if was_placed {
                    let pos = design.cell(cell).pos;
                    self.occupy(design, cell, pos);
                }
                false
            }
        }
    }
}

impl PlacementSurface for SiteGrid {
    fn map_move_to(&mut self, design: &mut Design, cell: CellId, target: Point) -> bool {
        self.relocate(design, cell, target, self.search_radius)
    }

    fn shift_move(&mut self, design: &mut Design, cell: CellId) -> bool {
        let target = self.init_location(design, cell);
        let radius = self.die.width() + self.die.height();
        self.relocate(design, cell, target, radius)
    }

    fn erase(&mut self, design: &mut Design, cell: CellId) {
        if !Self::movable(design, cell) || !design.cell(cell).is_placed {
            return;
        }
        self.release(design, cell);
        design.cell_mut(cell).is_placed = false;
    }

    fn swap_cells(&mut self, design: &mut Design, a: CellId, b: CellId) -> bool {
        if a == b || !Self::movable(design, a) || !Self::movable(design, b) {
            return false;
        }
        if !(design.cell(a).is_placed && design.cell(b).is_placed) {
            return false;
        }
        let (ma, mb) = (design.macro_of(a), design.macro_of(b));
        if ma.width != mb.width || ma.height != mb.height {
            return false;
        }

        let (pa, pb) = (design.cell(a).pos, design.cell(b).pos);
        if !self.region_ok(design, a, &design.footprint_at(a, pb))
            || !self.region_ok(design, b, &design.footprint_at(b, pa))
        {
            return false;
        }

        let before = self.displacement(design, a) + self.displacement(design, b);
        let after = pb.manhattan(design.cell(a).init) + pa.manhattan(design.cell(b).init);
        if after >= before {
            return false;
        }

        self.release(design, a);
        self.release(design, b);
        self.occupy(design, a, pb);
        self.occupy(design, b, pa);
        true
    }

    fn refine_move(&mut self, design: &mut Design, cell: CellId) -> bool {
        if !Self::movable(design, cell) || !design.cell(cell).is_placed {
            return false;
        }
        let current = self.displacement(design, cell);
        if current == 0 {
            return false;
        }
        let init = self.init_location(design, cell);
        let radius = self.search_radius.min(current.min(i32::MAX as i64) as i32);

        self.release(design, cell);
        let found = self
            .search(design, cell, init, radius)
            .filter(|origin| origin.manhattan(init) < current);
        let origin = found.unwrap_or(design.cell(cell).pos);
        self.occupy(design, cell, origin);
        found.is_some()
    }
}

impl RegionAssigner for SiteGrid {
    fn assign_group_regions(&mut self, design: &mut Design) {
        for group in design.group_ids().collect::<Vec<_>>() {
            let g = design.group(group);
            let regions = g.regions.clone();
            let siblings = g.siblings.clone();

            let boundary = Rect::bounding(&regions).unwrap_or_default();
            let region_area: i64 = regions.iter().map(Rect::area).sum();
            let sibling_area: i64 = siblings.iter().map(|&c| design.cell_area(c)).sum();
            let util = if region_area > 0 {
                sibling_area as f64 / region_area as f64
            } else {
                0.0
            };

            for &cell in &siblings {
                let mut best: Option<(i64, usize)> = None;
                for (i, region) in regions.iter().enumerate() {
                    let dist = cell_anchor(design, cell, region).dist;
                    if best.map_or(true, |(d, _)| dist < d) {
                        best = Some((dist, i));
                    }
                }
                design.cell_mut(cell).region = best.map(|(_, i)| i);
            }

            let g = design.group_mut(group);
            g.boundary = boundary;
            g.util = util;
        }
    }

    fn assign_non_group_regions(&mut self, design: &mut Design) {
        let mut coverage = vec![0u32; self.sites.len()];
        let footprints: Vec<Rect> = design
            .cell_ids()
            .map(|c| design.footprint_at(c, design.cell(c).init))
            .collect();

        for footprint in &footprints {
            for i in self.sites_of(footprint) {
                coverage[i] += 1;
            }
        }

        for cell in design.cell_ids().collect::<Vec<_>>() {
            if design.cell(cell).fixed {
                continue;
            }
            let sites = self.sites_of(&footprints[cell.as_raw() as usize]);
            let dense = if sites.is_empty() {
                0.0
            } else {
                sites.iter().map(|&i| coverage[i] as f64).sum::<f64>() / sites.len() as f64
            };
            design.cell_mut(cell).dense_factor = dense;
        }
    }
}
