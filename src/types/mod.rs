//! Types which are used throughout the library but have no natural home elsewhere.

pub mod err;
