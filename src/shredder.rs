//! Implements column shredding: flattening nested records into repetition
//! levels, definition levels and leaf values.

use crate::column::ShreddedColumn;
use crate::error::{DremelError, Result};
use crate::level::{DefinitionLevel, LevelBounds, RepetitionLevel, Slot};
use crate::value::NestedValue;

/// Shreds `records` into a [`ShreddedColumn`].
///
/// See [`Shredder::shred`].
pub fn shred<T: Clone>(
    records: &[NestedValue<T>],
    max_definition_level: DefinitionLevel,
) -> Result<ShreddedColumn<T>> {
    Shredder::new(max_definition_level).shred(records)
}

/// Flattens a sequence of nested records into parallel level sequences.
///
/// The max definition level is derived from a schema by the caller, every
/// optional and every repeated field contributes one level. The shredder never
/// infers it, it only checks that it is usable for the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shredder {
    max_definition_level: DefinitionLevel,
}

impl Shredder {
    pub fn new(max_definition_level: DefinitionLevel) -> Self {
        Self {
            max_definition_level,
        }
    }

    /// Shreds every record in order.
    ///
    /// The traversal is depth-first. The first slot of every record has
    /// repetition level 0. The first slot emitted for a list element inherits
    /// the repetition level of its list, every later element of a list at
    /// depth `k` starts with repetition level `k`.
    ///
    /// A leaf emits the max definition level and its value. A null, or an
    /// empty list, emits only a lower definition level, see [`LevelBounds`].
    ///
    /// Returns an error if the max definition level is negative, if it is
    /// lower than the list nesting depth of the records, if a record holds
    /// a scalar at a different depth than the other scalars of the column, or
    /// if a record holds a null where the max definition level has no level
    /// for it.
    pub fn shred<T: Clone>(&self, records: &[NestedValue<T>]) -> Result<ShreddedColumn<T>> {
        let bounds = self.bounds_for(records)?;
        let leaf_depth = bounds.leaf_depth();

        let mut repetitions = Vec::new();
        let mut definitions = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());

        let mut work: Vec<(&NestedValue<T>, usize, RepetitionLevel)> = vec![];
        for (index, record) in records.iter().enumerate() {
            work.push((record, 0, 0));

            while let Some((value, depth, repetition)) = work.pop() {
                let slot = match value {
                    NestedValue::Leaf(leaf) => {
                        if depth != leaf_depth {
                            return Err(DremelError::MixedNesting {
                                record: index,
                                depth,
                                leaf_depth,
                            });
                        }
                        values.push(leaf.clone());
                        Slot::Value
                    }
                    NestedValue::Null => {
                        let slot = if depth == 0 {
                            Slot::NullRecord
                        } else {
                            Slot::NullElement(depth)
                        };
                        if !bounds.is_representable(slot) {
                            return Err(DremelError::NullNotRepresentable {
                                record: index,
                                depth,
                                max_definition_level: self.max_definition_level,
                            });
                        }
                        slot
                    }
                    NestedValue::List(items) if items.is_empty() => Slot::EmptyList(depth + 1),
                    NestedValue::List(items) => {
                        // Bounded by the nesting depth checked in `bounds_for`.
                        let list_depth = (depth + 1) as RepetitionLevel;
                        for (position, item) in items.iter().enumerate().rev() {
                            let repetition = if position == 0 {
                                repetition
                            } else {
                                list_depth
                            };
                            work.push((item, depth + 1, repetition));
                        }
                        continue;
                    }
                };

                if !bounds.is_flat() {
                    repetitions.push(repetition);
                }
                definitions.push(bounds.definition_level(slot));
            }
        }

        log::debug!(
            "shredded {} records into {} slots with {} values, bounds: {:?}",
            records.len(),
            definitions.len(),
            values.len(),
            bounds
        );

        Ok(ShreddedColumn::new(repetitions, definitions, values, bounds))
    }

    fn bounds_for<T>(&self, records: &[NestedValue<T>]) -> Result<LevelBounds> {
        if self.max_definition_level < 0 {
            return Err(DremelError::NegativeMaxDefinitionLevel(
                self.max_definition_level,
            ));
        }

        let nesting = records
            .iter()
            .map(NestedValue::list_depth)
            .max()
            .unwrap_or(0);
        let max_repetition_level = repetition_level(nesting)?;

        if self.max_definition_level < max_repetition_level {
            return Err(DremelError::MaxDefinitionLevelTooLow {
                max_definition_level: self.max_definition_level,
                max_repetition_level,
            });
        }

        Ok(LevelBounds::new(
            self.max_definition_level,
            max_repetition_level,
        ))
    }
}

fn repetition_level(nesting: usize) -> Result<RepetitionLevel> {
    RepetitionLevel::try_from(nesting).map_err(|_| DremelError::NestingTooDeep(nesting))
}
