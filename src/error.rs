//! Dremel error types

use crate::level::Level;
use thiserror::Error;

/// Result type for [`DremelError`]
pub type Result<T, E = DremelError> = std::result::Result<T, E>;

/// Error Type
///
/// Every variant is a contract violation by the caller. Retrying the same
/// call with the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DremelError {
    /// The max definition level passed to the shredder was negative.
    #[error("max definition level must not be negative, got: {0}")]
    NegativeMaxDefinitionLevel(Level),

    /// An explicitly configured max repetition level was negative.
    #[error("max repetition level must not be negative, got: {0}")]
    NegativeMaxRepetitionLevel(Level),

    /// The max definition level cannot describe the nesting of the records.
    #[error(
        "max definition level: {max_definition_level} is lower than the list nesting \
         depth: {max_repetition_level} of the records"
    )]
    MaxDefinitionLevelTooLow {
        max_definition_level: Level,
        max_repetition_level: Level,
    },

    /// The records nest lists deeper than a level can count.
    #[error("list nesting depth: {0} does not fit into a repetition level")]
    NestingTooDeep(usize),

    /// A null was found where the max definition level leaves no level for it.
    #[error(
        "record: {record} holds a null at depth: {depth}, but max definition level: \
         {max_definition_level} makes that position required"
    )]
    NullNotRepresentable {
        record: usize,
        depth: usize,
        max_definition_level: Level,
    },

    /// A leaf value was found at a depth different from the column's leaf depth.
    #[error(
        "Invalid data structure, record: {record} mixes lists and scalars, \
         found a scalar at depth: {depth} but leaves live at depth: {leaf_depth}"
    )]
    MixedNesting {
        record: usize,
        depth: usize,
        leaf_depth: usize,
    },

    /// The repetition and definition level sequences are not aligned.
    #[error(
        "repetitions, definitions and values count must be exactly the same, \
         repetitions: {repetitions}, definitions: {definitions}"
    )]
    LevelCountMismatch {
        repetitions: usize,
        definitions: usize,
    },

    /// The first repetition level does not start a new record.
    #[error(
        "Repetitions must start with zero, otherwise it probably means that your data was \
         split into multiple pages in which case proper reconstruction of rows is impossible. \
         First repetition: {0}"
    )]
    NonZeroFirstRepetition(Level),

    /// A repetition or definition level was negative.
    #[error("{kind} level at index: {index} is negative: {level}")]
    NegativeLevel {
        kind: LevelKind,
        index: usize,
        level: Level,
    },

    /// A repetition or definition level exceeded the column bounds.
    #[error("{kind} level at index: {index} is {level}, above the max {kind} level: {max}")]
    LevelOutOfRange {
        kind: LevelKind,
        index: usize,
        level: Level,
        max: Level,
    },

    /// A slot marking the whole record as null continued an earlier record.
    #[error("slot at index: {index} marks a null record but has repetition level: {repetition}")]
    NullRecordContinuation { index: usize, repetition: Level },

    /// A repetition level continues a list which the slot, or the slot before
    /// it, does not have open.
    #[error(
        "slot at index: {index} has repetition level: {repetition}, but only lists down to \
         depth: {max} are open"
    )]
    RepetitionLevelMismatch {
        index: usize,
        repetition: Level,
        max: usize,
    },

    /// Fewer values were supplied than the definition levels require.
    #[error("definition levels require {expected} values, but only {actual} were supplied")]
    MissingValues { expected: usize, actual: usize },
}

/// Identifies which of the two level sequences an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Repetition,
    Definition,
}

impl std::fmt::Display for LevelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelKind::Repetition => write!(f, "repetition"),
            LevelKind::Definition => write!(f, "definition"),
        }
    }
}
