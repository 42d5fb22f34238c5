//! Errors for designs that cannot be legalized as given.

use crate::ids::{CellId, GroupId, MacroId};
use tessera_common::Rect;

/// A structural problem in the input design.
///
/// Placement difficulty is never reported through this type; a design that is
/// merely hard to legalize produces warnings instead.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    /// The die rectangle covers no sites.
    #[error("die {0} is empty")]
    EmptyDie(Rect),

    /// A macro has a non-positive width or height.
    #[error("macro '{name}' has invalid size {width}x{height}")]
    EmptyMacro {
        /// Macro name.
        name: String,
        /// Width in sites.
        width: i32,
        /// Height in rows.
        height: i32,
    },

    /// A cell references a macro that does not exist.
    #[error("cell '{cell}' references unknown macro {macro_id}")]
    UnknownMacro {
        /// Cell name.
        cell: String,
        /// The dangling macro id.
        macro_id: MacroId,
    },

    /// A cell references a group that does not exist.
    #[error("cell '{cell}' references unknown group {group}")]
    UnknownGroup {
        /// Cell name.
        cell: String,
        /// The dangling group id.
        group: GroupId,
    },

    /// A group's sibling list disagrees with the cells' group membership.
    #[error("group '{group}' sibling list is inconsistent with cell {cell}")]
    SiblingMismatch {
        /// Group name.
        group: String,
        /// The offending cell id.
        cell: CellId,
    },

    /// Two cells share a name.
    #[error("duplicate cell name '{0}'")]
    DuplicateCell(String),

    /// A stored id does not match the arena position.
    #[error("{kind} at index {index} carries id {id}")]
    IdMismatch {
        /// Entity kind ("cell", "macro", "group").
        kind: &'static str,
        /// Arena position.
        index: usize,
        /// The stored raw id.
        id: u32,
    },

    /// A group region lies (partly) outside the die.
    #[error("group '{group}' region {region} is outside the die")]
    RegionOutsideDie {
        /// Group name.
        group: String,
        /// The offending region.
        region: Rect,
    },

    /// A fixed or already placed cell conflicts with another such cell.
    #[error("pre-placed cell '{cell}' overlaps '{other}'")]
    PreplacedOverlap {
        /// Cell name.
        cell: String,
        /// Name of the cell already holding the sites.
        other: String,
    },

    /// An already placed movable cell sits outside the die.
    #[error("pre-placed cell '{0}' lies outside the die")]
    PreplacedOutsideDie(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_macro() {
        let err = DesignError::UnknownMacro {
            cell: "u1".into(),
            macro_id: MacroId::from_raw(7),
        };
        assert_eq!(format!("{err}"), "cell 'u1' references unknown macro m7");
    }

    #[test]
    fn display_region_outside_die() {
        let err = DesignError::RegionOutsideDie {
            group: "pd_core".into(),
            region: Rect::new(0, 0, 4, 2),
        };
        assert_eq!(
            format!("{err}"),
            "group 'pd_core' region [0, 4) x [0, 2) is outside the die"
        );
    }
}
