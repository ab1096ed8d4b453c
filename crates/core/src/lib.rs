//! Pure domain logic for the cadet Training Record Book.
//!
//! This crate has no I/O: it holds the domain enums, identifier and
//! calendar-date helpers, the sea-service day calculator, the training-task
//! status machine, and the watchkeeping hours / position codecs. The `db`
//! crate layers persistence on top of it.

pub mod dates;
pub mod error;
pub mod ids;
pub mod position;
pub mod sea_service;
pub mod session;
pub mod stream;
pub mod task_status;
pub mod types;
pub mod vessel;
pub mod watch;
