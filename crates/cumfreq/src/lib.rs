#![forbid(unsafe_code)]

//! Cumulative frequency tables for adaptive coding.
//!
//! This crate provides [`FrequencyTable`], a Fenwick tree (Binary Indexed
//! Tree, after Peter Fenwick's 1994 cumulative-frequency-table paper) over
//! non-negative integer frequencies. It supports O(log n) point update,
//! prefix-sum query, and the inverse query — given a cumulative target,
//! find the position whose running sum first reaches it — plus a bulk
//! rescale that adaptive models use to keep counts bounded.
//!
//! The intended host is an adaptive entropy coder (arithmetic or range
//! coder): bump a symbol's count on every occurrence, translate between
//! symbols and cumulative-probability ranges during encode/decode, and
//! rescale periodically before the total overflows available precision.
//! This crate has no opinion on alphabets, normalization, or stream
//! framing; it is the counting core only.
//!
//! # Example
//! ```
//! use cumfreq::FrequencyTable;
//!
//! let mut table = FrequencyTable::new(8);
//! table.add_value(0, 5);
//! table.add_value(3, 2);
//! table.add_value(7, 1);
//!
//! assert_eq!(table.cumulative(3), 7);
//! assert_eq!(table.total(), 8);
//!
//! // Rank inversion: first position whose cumulative frequency reaches 6.
//! assert_eq!(table.position_of_cumulative(6), Some(3));
//! assert_eq!(table.position_of_cumulative(9), None);
//!
//! // Halve all counts to keep them bounded.
//! table.rescale(2);
//! assert_eq!(table.frequency(0), 2);
//! ```

pub mod table;

pub use table::FrequencyTable;
