//! Results-directory collection: classify file names, extract timings, group by configuration.

pub mod collect;
pub mod parse;
pub mod row;

pub use collect::collect_dir;
pub use row::{Aggregate, SequentialRecord};
