//! Repetition and definition levels.
//!
//! A column has two bounds: the max definition level `M`, which comes from the
//! schema, and the max repetition level `L`, which is the list nesting depth of
//! the column. Every flat slot of a column is in one of these states:
//!
//! ```text
//! structural depth   slot
//! ----------------   -------------------------------------------
//! 0                  the record itself is null
//! 2k - 1             the list at depth k is present but empty
//! 2k                 a null element inside the list at depth k
//! 2L + 1             a leaf value
//! ```
//!
//! Walking from the record down to the leaf there are `2L + 1` steps. Step
//! `2j` is optional: the record (`j = 0`) or an element of the list at depth
//! `j` is not null. Step `2k - 1` is repeated: the list at depth `k` is not
//! empty. The definition level of a slot counts the steps the schema knows
//! about which are satisfied on the way to the slot.
//!
//! Repeated steps always count, so `M` must be at least `L`. The remaining
//! `M - L` levels are spent on optional steps from the outside in. With
//! `M = L` the record and every element are required, `M = L + 1` allows a
//! null record, and so on. Levels above `2L + 1` describe optional ancestors
//! outside the column, which are present for every slot.
//!
//! A null at an optional step the schema does not count cannot be encoded,
//! see [`LevelBounds::is_representable`].

/// A repetition or a definition level.
pub type Level = i16;

/// Repetition level
pub type RepetitionLevel = Level;

/// Definition level
pub type DefinitionLevel = Level;

/// The position a single flat slot describes in a nested record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A leaf value is present at full depth.
    Value,
    /// The whole record is null.
    NullRecord,
    /// The list at the given depth (1-based) is present but has no elements.
    EmptyList(usize),
    /// The list at the given depth (1-based) holds a null element.
    NullElement(usize),
}

impl Slot {
    fn from_structural_depth(depth: i32) -> Self {
        if depth <= 0 {
            Slot::NullRecord
        } else if depth % 2 == 1 {
            Slot::EmptyList(((depth + 1) / 2) as usize)
        } else {
            Slot::NullElement((depth / 2) as usize)
        }
    }

    fn structural_depth(&self, max_repetition_level: Level) -> i32 {
        match self {
            Slot::Value => 2 * i32::from(max_repetition_level) + 1,
            Slot::NullRecord => 0,
            Slot::EmptyList(depth) => 2 * (*depth as i32) - 1,
            Slot::NullElement(depth) => 2 * (*depth as i32),
        }
    }

    /// Nesting depth below which a repetition level can continue the record
    /// at this slot.
    ///
    /// A value or a null element sits inside every list down to its depth. An
    /// empty list sits inside its parent lists only, it can never receive an
    /// element of its own.
    pub fn open_depth(&self, max_repetition_level: RepetitionLevel) -> usize {
        match self {
            Slot::Value => max_repetition_level.max(0) as usize,
            Slot::NullRecord => 0,
            Slot::EmptyList(depth) => depth.saturating_sub(1),
            Slot::NullElement(depth) => *depth,
        }
    }
}

/// The max definition and repetition level of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelBounds {
    max_definition_level: DefinitionLevel,
    max_repetition_level: RepetitionLevel,
}

impl LevelBounds {
    /// Creates column bounds. Both levels are expected to be non-negative,
    /// and the max definition level at least the max repetition level.
    pub fn new(
        max_definition_level: DefinitionLevel,
        max_repetition_level: RepetitionLevel,
    ) -> Self {
        Self {
            max_definition_level,
            max_repetition_level,
        }
    }

    pub fn max_definition_level(&self) -> DefinitionLevel {
        self.max_definition_level
    }

    pub fn max_repetition_level(&self) -> RepetitionLevel {
        self.max_repetition_level
    }

    /// The list nesting depth, which is also the depth at which leaves live.
    pub fn leaf_depth(&self) -> usize {
        self.max_repetition_level.max(0) as usize
    }

    /// A flat column has no repeated ancestors, every slot is one record.
    pub fn is_flat(&self) -> bool {
        self.max_repetition_level == 0
    }

    /// Number of optional steps, counted from the record down, which have a
    /// definition level of their own.
    fn optional_steps(&self) -> i32 {
        let max_repetition_level = i32::from(self.max_repetition_level.max(0));
        (i32::from(self.max_definition_level) - max_repetition_level)
            .clamp(0, max_repetition_level + 1)
    }

    /// Levels taken by optional ancestors outside the column.
    fn outer_levels(&self) -> i32 {
        let full = Slot::Value.structural_depth(self.max_repetition_level.max(0));
        (i32::from(self.max_definition_level) - full).max(0)
    }

    /// Number of counted steps satisfied before reaching `depth`.
    fn counted_steps(&self, depth: i32) -> i32 {
        depth / 2 + ((depth + 1) / 2).min(self.optional_steps())
    }

    /// Whether `slot` has a definition level of its own.
    ///
    /// Values and empty lists always do. A null record or a null element
    /// needs the optional step it breaks to be counted by the schema,
    /// otherwise it shares its level with the next deeper state.
    pub fn is_representable(&self, slot: Slot) -> bool {
        match slot {
            Slot::Value | Slot::EmptyList(_) => true,
            Slot::NullRecord => self.optional_steps() > 0,
            Slot::NullElement(depth) => (depth as i32) < self.optional_steps(),
        }
    }

    /// Returns the definition level which encodes `slot`.
    pub fn definition_level(&self, slot: Slot) -> DefinitionLevel {
        match slot {
            Slot::Value => self.max_definition_level,
            _ => {
                let depth = slot.structural_depth(self.max_repetition_level);
                (self.outer_levels() + self.counted_steps(depth)) as DefinitionLevel
            }
        }
    }

    /// Returns the slot a definition level decodes to.
    ///
    /// When several states share a level the deepest one wins, which is the
    /// only one of them the schema can represent.
    pub fn slot(&self, definition_level: DefinitionLevel) -> Slot {
        if definition_level >= self.max_definition_level {
            return Slot::Value;
        }

        let level = i32::from(definition_level) - self.outer_levels();
        let optional_steps = self.optional_steps();
        let depth = if level < 2 * optional_steps {
            level
        } else {
            // Past the counted optional steps only empty lists remain.
            2 * (level - optional_steps) + 1
        };
        Slot::from_structural_depth(depth)
    }
}
