//! Implements record assembly: the inverse of shredding.

use crate::error::{DremelError, LevelKind, Result};
use crate::level::{DefinitionLevel, Level, LevelBounds, RepetitionLevel, Slot};
use crate::stack::ReconstructionStack;
use crate::value::NestedValue;

/// Reconstructs nested records from repetition levels, definition levels and
/// values, deriving the level bounds from the data.
///
/// See [`Assembler::assemble`].
pub fn assemble<'a, T>(
    repetitions: &'a [RepetitionLevel],
    definitions: &'a [DefinitionLevel],
    values: Vec<T>,
) -> Result<Records<'a, std::vec::IntoIter<T>>> {
    Assembler::new().assemble(repetitions, definitions, values)
}

/// Reassembles column-striped data back into nested records.
///
/// By default the bounds are derived from the data: the max definition level
/// is the largest definition level observed, and the max repetition level the
/// largest repetition level observed (at least 1 when repetition levels are
/// present at all). This is exact as long as the column holds at least one
/// leaf value and every list level repeats somewhere in the column. Set the
/// bounds explicitly when the schema is known.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Assembler {
    max_definition_level: Option<DefinitionLevel>,
    max_repetition_level: Option<RepetitionLevel>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_definition_level(mut self, level: DefinitionLevel) -> Self {
        self.max_definition_level = Some(level);
        self
    }

    pub fn with_max_repetition_level(mut self, level: RepetitionLevel) -> Self {
        self.max_repetition_level = Some(level);
        self
    }

    pub fn with_bounds(self, bounds: LevelBounds) -> Self {
        self.with_max_definition_level(bounds.max_definition_level())
            .with_max_repetition_level(bounds.max_repetition_level())
    }

    /// Validates the input and returns a lazy iterator of the records.
    ///
    /// An empty `repetitions` slice marks a flat column in which every slot
    /// starts a new record. Otherwise both level slices must have the same
    /// length and the first repetition level must be 0. A non-zero first
    /// level cannot be told apart from the continuation of a record started
    /// on an earlier page.
    ///
    /// Values are consumed left to right, one per slot at the max definition
    /// level. Surplus values are ignored. Any exact-size source of values
    /// works, so a caller holding a slice can pass `values.iter().cloned()`
    /// instead of copying it up front.
    ///
    /// A repetition level must only continue lists which are open both at the
    /// slot and right before it, see [`Slot::open_depth`].
    ///
    /// All checks run before the iterator is returned, so iteration itself
    /// never fails.
    pub fn assemble<'a, V>(
        &self,
        repetitions: &'a [RepetitionLevel],
        definitions: &'a [DefinitionLevel],
        values: V,
    ) -> Result<Records<'a, V::IntoIter>>
    where
        V: IntoIterator,
        V::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        let bounds = self.validate(repetitions, definitions, values.len())?;

        log::debug!(
            "assembling {} slots with {} values, bounds: {:?}",
            definitions.len(),
            values.len(),
            bounds
        );

        Ok(Records {
            repetitions,
            definitions,
            values,
            bounds,
            position: 0,
        })
    }

    fn validate(
        &self,
        repetitions: &[RepetitionLevel],
        definitions: &[DefinitionLevel],
        num_values: usize,
    ) -> Result<LevelBounds> {
        if !repetitions.is_empty() && repetitions.len() != definitions.len() {
            return Err(DremelError::LevelCountMismatch {
                repetitions: repetitions.len(),
                definitions: definitions.len(),
            });
        }

        if let Some(&first) = repetitions.first() {
            if first != 0 {
                return Err(DremelError::NonZeroFirstRepetition(first));
            }
        }

        check_non_negative(LevelKind::Repetition, repetitions)?;
        check_non_negative(LevelKind::Definition, definitions)?;

        let bounds = self.bounds_for(repetitions, definitions)?;
        if bounds.max_definition_level() < bounds.max_repetition_level() {
            return Err(DremelError::MaxDefinitionLevelTooLow {
                max_definition_level: bounds.max_definition_level(),
                max_repetition_level: bounds.max_repetition_level(),
            });
        }

        check_in_range(
            LevelKind::Repetition,
            repetitions,
            bounds.max_repetition_level(),
        )?;
        check_in_range(
            LevelKind::Definition,
            definitions,
            bounds.max_definition_level(),
        )?;

        let max_repetition_level = bounds.max_repetition_level();
        let mut expected_values = 0;
        let mut previous = Slot::NullRecord;
        for (index, &definition) in definitions.iter().enumerate() {
            let repetition = repetitions.get(index).copied().unwrap_or(0);
            let slot = bounds.slot(definition);

            if repetition > 0 {
                if previous == Slot::NullRecord || slot == Slot::NullRecord {
                    return Err(DremelError::NullRecordContinuation { index, repetition });
                }

                let max = slot
                    .open_depth(max_repetition_level)
                    .min(previous.open_depth(max_repetition_level));
                if repetition as usize > max {
                    return Err(DremelError::RepetitionLevelMismatch {
                        index,
                        repetition,
                        max,
                    });
                }
            }

            if slot == Slot::Value {
                expected_values += 1;
            }
            previous = slot;
        }

        if num_values < expected_values {
            return Err(DremelError::MissingValues {
                expected: expected_values,
                actual: num_values,
            });
        }

        Ok(bounds)
    }

    fn bounds_for(
        &self,
        repetitions: &[RepetitionLevel],
        definitions: &[DefinitionLevel],
    ) -> Result<LevelBounds> {
        let max_definition_level = match self.max_definition_level {
            Some(level) if level < 0 => {
                return Err(DremelError::NegativeMaxDefinitionLevel(level));
            }
            Some(level) => level,
            None => definitions.iter().copied().max().unwrap_or(0),
        };

        let max_repetition_level = match self.max_repetition_level {
            Some(level) if level < 0 => {
                return Err(DremelError::NegativeMaxRepetitionLevel(level));
            }
            Some(level) => level,
            // Flat columns carry no repetition levels at all.
            None if repetitions.is_empty() => 0,
            None => repetitions.iter().copied().max().unwrap_or(0).max(1),
        };

        Ok(LevelBounds::new(max_definition_level, max_repetition_level))
    }
}

fn check_non_negative(kind: LevelKind, levels: &[Level]) -> Result<()> {
    match levels.iter().position(|&level| level < 0) {
        Some(index) => Err(DremelError::NegativeLevel {
            kind,
            index,
            level: levels[index],
        }),
        None => Ok(()),
    }
}

fn check_in_range(kind: LevelKind, levels: &[Level], max: Level) -> Result<()> {
    match levels.iter().position(|&level| level > max) {
        Some(index) => Err(DremelError::LevelOutOfRange {
            kind,
            index,
            level: levels[index],
            max,
        }),
        None => Ok(()),
    }
}

/// A lazy iterator over the records reassembled by an [`Assembler`].
///
/// Levels are scanned once, left to right, and values are pulled from `V` as
/// they are needed. Only the record currently being built is held in memory.
#[derive(Debug)]
pub struct Records<'a, V> {
    repetitions: &'a [RepetitionLevel],
    definitions: &'a [DefinitionLevel],
    values: V,
    bounds: LevelBounds,
    position: usize,
}

impl<V: Iterator> Records<'_, V> {
    /// The bounds used to decode the levels.
    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    fn repetition(&self, index: usize) -> usize {
        self.repetitions.get(index).copied().unwrap_or(0).max(0) as usize
    }

    fn next_flat(&mut self) -> Option<NestedValue<V::Item>> {
        let definition = self.definitions[self.position];
        self.position += 1;

        match self.bounds.slot(definition) {
            Slot::Value => self.values.next().map(NestedValue::Leaf),
            Slot::NullRecord | Slot::EmptyList(_) | Slot::NullElement(_) => {
                Some(NestedValue::Null)
            }
        }
    }

    fn next_nested(&mut self) -> Option<NestedValue<V::Item>> {
        let first = self.position;
        let mut stack = ReconstructionStack::empty(self.bounds.leaf_depth());

        let mut index = first;
        while index < self.definitions.len() && (index == first || self.repetition(index) > 0) {
            let repetition = self.repetition(index);
            let slot = self.bounds.slot(self.definitions[index]);

            match slot {
                Slot::Value => {
                    let value = self.values.next()?;
                    stack.push(NestedValue::Leaf(value), repetition);
                }
                Slot::NullRecord => {
                    self.position = index + 1;
                    return Some(NestedValue::Null);
                }
                Slot::EmptyList(depth) => {
                    stack.push_empty_list(repetition, depth);
                }
                Slot::NullElement(depth) => {
                    stack.push_null(repetition, depth);
                }
            }

            log::trace!(
                "slot: {} repetition: {} definition: {} decoded: {:?} open depth: {}",
                index,
                repetition,
                self.definitions[index],
                slot,
                stack.depth()
            );
            index += 1;
        }

        self.position = index;
        Some(stack.into_value())
    }
}

impl<V: Iterator> Iterator for Records<'_, V> {
    type Item = NestedValue<V::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.definitions.len() {
            return None;
        }

        if self.bounds.is_flat() {
            self.next_flat()
        } else {
            self.next_nested()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.definitions.len() - self.position;
        (remaining.min(1), Some(remaining))
    }
}
