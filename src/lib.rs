//! A library which implements column shredding of nested data structures by
//! encoding definition and repetition levels for each value, and assembly of
//! the nested data structures back from those levels.
//!
//! A column is a sequence of records. Each record is a [`NestedValue`]: a
//! scalar, a null, or an arbitrarily deep list of nested values. Shredding
//! turns the records into three parallel flat sequences: repetition levels,
//! definition levels and leaf values. Assembly is the exact inverse.
//!
//! ```
//! use dremel::{nested, shred, NestedValue};
//!
//! let records: Vec<NestedValue<i64>> = vec![nested!([1, 2, 3]), nested!([null, null]), nested!([4, 5, 6])];
//! let column = shred(&records, 3).unwrap();
//!
//! assert_eq!(column.repetitions(), &[0, 1, 1, 0, 1, 0, 1, 1]);
//! assert_eq!(column.definitions(), &[3, 3, 3, 2, 2, 3, 3, 3]);
//! assert_eq!(column.values(), &[1, 2, 3, 4, 5, 6]);
//!
//! let assembled = column.assemble().unwrap().collect::<Vec<_>>();
//! assert_eq!(assembled, records);
//! ```
//!
//! # Design
//! The technique for column shredding is described in the paper:
//! [Dremel: Interactive Analysis of Web-Scale Datasets](https://static.googleusercontent.com/media/research.google.com/en//pubs/archive/36632.pdf).
//!
//! The max definition level is always supplied by the caller, it is derived
//! from a schema outside of this crate. How absent values map to definition
//! levels is described in [`level`].

#![warn(missing_debug_implementations)]

pub mod assembler;
pub mod column;
pub mod error;
pub mod level;
pub mod shredder;
pub mod stack;
pub mod value;

pub use self::assembler::{assemble, Assembler, Records};
pub use self::column::ShreddedColumn;
pub use self::error::{DremelError, Result};
pub use self::level::{DefinitionLevel, Level, LevelBounds, RepetitionLevel, Slot};
pub use self::shredder::{shred, Shredder};
pub use self::stack::ReconstructionStack;
pub use self::value::NestedValue;
