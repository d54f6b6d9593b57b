pub mod compare;
pub mod reconcile;
pub mod report;
pub mod select;
pub mod sync;
