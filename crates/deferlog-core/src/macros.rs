//! Convenience macros

/// Build a metadata list from values convertible into `Metadata`
///
/// # Example
///
/// ```
/// use deferlog_core::{meta, Metadata};
///
/// let items = meta!["user", 42, true];
/// assert_eq!(items.len(), 3);
/// assert!(meta![].is_empty());
/// assert_eq!(items[0], Metadata::from("user"));
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        ::std::vec::Vec::<$crate::Metadata>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::Metadata::from($item)),+]
    };
}
