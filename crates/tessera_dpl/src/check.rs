//! Post-run legality checking and displacement statistics.

use crate::data::Design;
use crate::ids::CellId;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Every legality violation found in a placement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LegalityReport {
    /// Movable cells without a position.
    pub unplaced: Vec<String>,
    /// Pairs of placed cells sharing at least one site.
    pub overlaps: Vec<(String, String)>,
    /// Placed movable cells extending past the die.
    pub outside_die: Vec<String>,
    /// Group members not fully inside one of their group's regions.
    pub region_violations: Vec<String>,
    /// Cells without a group overlapping some group region.
    pub group_intrusions: Vec<String>,
}

impl LegalityReport {
    /// Returns whether no violation was found.
    pub fn is_legal(&self) -> bool {
        self.unplaced.is_empty()
            && self.overlaps.is_empty()
            && self.outside_die.is_empty()
            && self.region_violations.is_empty()
            && self.group_intrusions.is_empty()
    }

    /// Returns the total number of violations.
    pub fn violation_count(&self) -> usize {
        self.unplaced.len()
            + self.overlaps.len()
            + self.outside_die.len()
            + self.region_violations.len()
            + self.group_intrusions.len()
    }
}

impl fmt::Display for LegalityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_legal() {
            return writeln!(f, "placement is legal");
        }
        writeln!(f, "{} violations", self.violation_count())?;
        for name in &self.unplaced {
            writeln!(f, "  unplaced: {name}")?;
        }
        for (a, b) in &self.overlaps {
            writeln!(f, "  overlap: {a} / {b}")?;
        }
        for name in &self.outside_die {
            writeln!(f, "  outside die: {name}")?;
        }
        for name in &self.region_violations {
            writeln!(f, "  outside group regions: {name}")?;
        }
        for name in &self.group_intrusions {
            writeln!(f, "  inside a group region: {name}")?;
        }
        Ok(())
    }
}

/// Checks a placement against the die, occupancy, and group constraints.
pub fn check_placement(design: &Design) -> LegalityReport {
    let mut report = LegalityReport::default();
    let mut occupancy: HashMap<(i32, i32), CellId> = HashMap::new();
    let mut overlaps = BTreeSet::new();

    for cell in design.cell_ids() {
        let c = design.cell(cell);
        // fixed cells occupy their sites whether or not they are flagged placed
        if !c.is_placed && !c.fixed {
            report.unplaced.push(c.name.clone());
            continue;
        }

        let footprint = design.footprint(cell);
        for y in footprint.y_min..footprint.y_max {
            for x in footprint.x_min..footprint.x_max {
                if let Some(&other) = occupancy.get(&(x, y)) {
                    overlaps.insert((other, cell));
                } else {
                    occupancy.insert((x, y), cell);
                }
            }
        }
        if c.fixed {
            continue;
        }

        if !design.die.contains_rect(&footprint) {
            report.outside_die.push(c.name.clone());
        }
        match c.group {
            Some(group) => {
                let inside = design
                    .group(group)
                    .regions
                    .iter()
                    .any(|r| r.contains_rect(&footprint));
                if !inside {
                    report.region_violations.push(c.name.clone());
                }
            }
            None => {
                let intrudes = design
                    .groups
                    .iter()
                    .flat_map(|g| g.regions.iter())
                    .any(|r| r.overlaps(&footprint));
                if intrudes {
                    report.group_intrusions.push(c.name.clone());
                }
            }
        }
    }

    report.overlaps = overlaps
        .into_iter()
        .map(|(a, b)| (design.cell(a).name.clone(), design.cell(b).name.clone()))
        .collect();
    report
}

/// Displacement summary over placed movable cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DisplacementStats {
    /// Number of cells measured.
    pub cells: usize,
    /// Sum of Manhattan displacements.
    pub total: i64,
    /// Mean displacement (0 when no cell is measured).
    pub mean: f64,
    /// Largest displacement.
    pub max: i64,
    /// Name of the cell with the largest displacement (first on ties).
    pub max_cell: Option<String>,
}

impl DisplacementStats {
    /// Measures every placed, movable cell of `design`.
    pub fn from_design(design: &Design) -> Self {
        let mut stats = Self::default();
        for c in design.cells.iter().filter(|c| c.is_placed && !c.fixed) {
            let disp = c.pos.manhattan(c.init);
            stats.cells += 1;
            stats.total += disp;
            if stats.max_cell.is_none() || disp > stats.max {
                stats.max = disp;
                stats.max_cell = Some(c.name.clone());
            }
        }
        if stats.cells > 0 {
            stats.mean = stats.total as f64 / stats.cells as f64;
        }
        stats
    }
}

impl fmt::Display for DisplacementStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "displacement over {} cells: total {}, mean {:.2}, max {}",
            self.cells, self.total, self.mean, self.max
        )?;
        if let Some(name) = &self.max_cell {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cell, Group, Macro};
    use tessera_common::{Point, Rect};

    fn placed(mut cell: Cell, at: Point) -> Cell {
        cell.pos = at;
        cell.is_placed = true;
        cell
    }

    #[test]
    fn legal_placement_passes() {
        let mut d = Design::new(Rect::new(0, 0, 10, 2));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        let g = d.add_group(Group::new("g", vec![Rect::new(5, 0, 10, 2)]));
        d.add_cell(placed(Cell::movable("a", inv, Point::new(0, 0)), Point::new(1, 0)));
        d.add_cell(placed(Cell::movable("b", inv, Point::new(6, 1)).in_group(g), Point::new(6, 1)));
        d.add_cell(Cell::fixed("blk", inv, Point::new(0, 0)));

        let report = check_placement(&d);
        assert!(report.is_legal(), "{report}");
        assert_eq!(report.to_string(), "placement is legal\n");
    }

    #[test]
    fn reports_each_violation_kind() {
        let mut d = Design::new(Rect::new(0, 0, 10, 2));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        let ff = d.add_macro(Macro::new("DFF2", 2, 2));
        let g = d.add_group(Group::new("g", vec![Rect::new(5, 0, 10, 2)]));
        d.add_cell(Cell::movable("floating", inv, Point::new(0, 0)));
        d.add_cell(placed(Cell::movable("a", inv, Point::new(0, 0)), Point::new(0, 0)));
        d.add_cell(placed(Cell::movable("b", ff, Point::new(0, 0)), Point::new(0, 0)));
        d.add_cell(placed(Cell::movable("edge", ff, Point::new(9, 1)), Point::new(9, 1)));
        d.add_cell(placed(Cell::movable("stray", inv, Point::new(2, 1)).in_group(g), Point::new(2, 1)));

        let report = check_placement(&d);
        assert!(!report.is_legal());
        assert_eq!(report.unplaced, vec!["floating"]);
        assert_eq!(report.overlaps, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(report.outside_die, vec!["edge"]);
        assert_eq!(report.region_violations, vec!["stray"]);
        assert_eq!(report.group_intrusions, vec!["edge"]);
        assert_eq!(report.violation_count(), 5);
    }

    #[test]
    fn fixed_cell_blocks_even_without_placed_flag() {
        let mut d = Design::new(Rect::new(0, 0, 4, 1));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        let mut blk = Cell::fixed("blk", inv, Point::new(1, 0));
        blk.is_placed = false;
        d.add_cell(blk);
        d.add_cell(placed(Cell::movable("u", inv, Point::new(1, 0)), Point::new(1, 0)));

        let report = check_placement(&d);
        assert!(!report.is_legal());
        assert!(report.unplaced.is_empty());
        assert_eq!(report.overlaps, vec![("blk".to_string(), "u".to_string())]);
    }

    #[test]
    fn displacement_stats() {
        let mut d = Design::new(Rect::new(0, 0, 10, 2));
        let inv = d.add_macro(Macro::new("INV", 1, 1));
        d.add_cell(placed(Cell::movable("a", inv, Point::new(0, 0)), Point::new(3, 1)));
        d.add_cell(placed(Cell::movable("b", inv, Point::new(5, 0)), Point::new(5, 0)));
        d.add_cell(Cell::movable("c", inv, Point::new(9, 0)));
        d.add_cell(Cell::fixed("blk", inv, Point::new(8, 1)));

        let stats = DisplacementStats::from_design(&d);
        assert_eq!(stats.cells, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.max, 4);
        assert_eq!(stats.max_cell.as_deref(), Some("a"));
    }

    #[test]
    fn empty_stats() {
        let d = Design::new(Rect::new(0, 0, 4, 4));
        let stats = DisplacementStats::from_design(&d);
        assert_eq!(stats, DisplacementStats::default());
        assert_eq!(
            stats.to_string(),
            "displacement over 0 cells: total 0, mean 0.00, max 0"
        );
    }
}
