//! The flat, column-striped form of a sequence of nested records.

use crate::assembler::{Assembler, Records};
use crate::error::Result;
use crate::level::{DefinitionLevel, LevelBounds, RepetitionLevel};
use std::iter::Cloned;
use std::slice;

/// Three parallel sequences produced by the [`Shredder`](crate::Shredder).
///
/// Every flat slot has one definition level. Only slots carrying a real leaf
/// (definition level equal to the max) have an entry in `values`, absence is
/// encoded purely through the level.
///
/// A flat column (no repeated ancestors) has no repetition levels at all, each
/// slot is then implicitly the start of a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShreddedColumn<T> {
    repetitions: Vec<RepetitionLevel>,
    definitions: Vec<DefinitionLevel>,
    values: Vec<T>,
    bounds: LevelBounds,
}

impl<T> ShreddedColumn<T> {
    pub(crate) fn new(
        repetitions: Vec<RepetitionLevel>,
        definitions: Vec<DefinitionLevel>,
        values: Vec<T>,
        bounds: LevelBounds,
    ) -> Self {
        Self {
            repetitions,
            definitions,
            values,
            bounds,
        }
    }

    pub fn repetitions(&self) -> &[RepetitionLevel] {
        &self.repetitions
    }

    pub fn definitions(&self) -> &[DefinitionLevel] {
        &self.definitions
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The level bounds the column was shredded with.
    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    /// Number of flat slots, present or absent.
    pub fn num_slots(&self) -> usize {
        self.definitions.len()
    }

    /// Number of records, which is the number of slots starting a record.
    pub fn num_records(&self) -> usize {
        if self.repetitions.is_empty() {
            self.definitions.len()
        } else {
            self.repetitions.iter().filter(|&&r| r == 0).count()
        }
    }

    /// Number of slots which do not carry a leaf value.
    pub fn null_count(&self) -> usize {
        self.definitions.len() - self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Consumes the column and returns `(repetitions, definitions, values)`.
    pub fn into_parts(self) -> (Vec<RepetitionLevel>, Vec<DefinitionLevel>, Vec<T>) {
        (self.repetitions, self.definitions, self.values)
    }

    /// Reconstructs the records using the exact bounds of the column.
    ///
    /// Unlike [`assemble`](crate::assemble) this does not have to guess the
    /// bounds from the data, so a column holding nothing but nulls or empty
    /// lists still assembles back into the original records. Values are
    /// cloned one at a time as the records are built.
    pub fn assemble(&self) -> Result<Records<'_, Cloned<slice::Iter<'_, T>>>>
    where
        T: Clone,
    {
        Assembler::new().with_bounds(self.bounds).assemble(
            &self.repetitions,
            &self.definitions,
            self.values.iter().cloned(),
        )
    }
}
