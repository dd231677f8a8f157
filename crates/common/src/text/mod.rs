//! String helpers
//!
//! [`StrExt`] adds chunking, abbreviation, case conversion, character-offset
//! access with negative offsets, and conversions to paths/URLs to `str`.
//! Regular-expression helpers live in [`regex`].
//!
//! Lengths and offsets are counted in `char`s, not bytes.

pub mod regex;

use std::ops::{Range, RangeFrom, RangeInclusive, RangeTo, RangeToInclusive};
use std::path::{Path, PathBuf};

use url::Url;

pub use self::regex::RegexExt;

/// Marker appended by [`StrExt::abbreviated`]
pub const ELLIPSIS: char = '…';

/// Where a string points to: an existing path or a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// A path that exists on the local file system
    Path(PathBuf),
    /// Any other string that parses as a URL
    Url(Url),
}

/// Character-offset ranges accepted by [`StrExt::substring`]
///
/// Negative offsets count from the end of the string (`-1` is the last
/// character).
pub trait OffsetRange {
    /// Resolve to a half-open `[start, end)` char range for a string of
    /// `count` characters, or `None` when out of bounds
    fn resolve(&self, count: usize) -> Option<(usize, usize)>;
}

fn resolve_offset(offset: isize, count: usize) -> Option<usize> {
    if offset >= 0 {
        usize::try_from(offset).ok()
    } else {
        count.checked_sub(offset.unsigned_abs())
    }
}

fn checked_range(start: usize, end: usize, count: usize) -> Option<(usize, usize)> {
    (start <= end && end <= count).then_some((start, end))
}

impl OffsetRange for Range<isize> {
    fn resolve(&self, count: usize) -> Option<(usize, usize)> {
        let start = resolve_offset(self.start, count)?;
        let end = resolve_offset(self.end, count)?;
        checked_range(start, end, count)
    }
}

impl OffsetRange for RangeInclusive<isize> {
    fn resolve(&self, count: usize) -> Option<(usize, usize)> {
        let start = resolve_offset(*self.start(), count)?;
        let end = resolve_offset(*self.end(), count)?.checked_add(1)?;
        checked_range(start, end, count)
    }
}

impl OffsetRange for RangeFrom<isize> {
    fn resolve(&self, count: usize) -> Option<(usize, usize)> {
        let start = resolve_offset(self.start, count)?;
        checked_range(start, count, count)
    }
}

impl OffsetRange for RangeTo<isize> {
    fn resolve(&self, count: usize) -> Option<(usize, usize)> {
        let end = resolve_offset(self.end, count)?;
        checked_range(0, end, count)
    }
}

impl OffsetRange for RangeToInclusive<isize> {
    fn resolve(&self, count: usize) -> Option<(usize, usize)> {
        let end = resolve_offset(self.end, count)?.checked_add(1)?;
        checked_range(0, end, count)
    }
}

/// Convenience methods on `str`
pub trait StrExt {
    /// Split into consecutive chunks of at most `length` characters
    ///
    /// A zero `length` yields no chunks; an empty string yields one empty
    /// chunk. Joining the chunks gives back the original string.
    fn components_of(&self, length: usize) -> Vec<String>;

    /// Abbreviate to at most `length` characters, ending with `…` when cut
    ///
    /// ```rust
    /// use foundationkit_common::text::StrExt;
    ///
    /// assert_eq!("Hello world".abbreviated(7), "Hello…");
    /// assert_eq!("Hello".abbreviated(5), "Hello");
    /// assert_eq!("Hello".abbreviated(1), "…");
    /// assert_eq!("Hello".abbreviated(0), "");
    /// ```
    fn abbreviated(&self, length: usize) -> String;

    /// Lossy ASCII conversion: every non-ASCII character becomes `?`
    fn ascii_lossy(&self) -> String;

    /// Convert `camelCase` to `Title Case`
    ///
    /// ```rust
    /// use foundationkit_common::text::StrExt;
    ///
    /// assert_eq!("camelCaseString".decamelized(), "Camel Case String");
    /// ```
    fn decamelized(&self) -> String;

    /// `Some(self)` unless the string is empty
    fn non_empty(&self) -> Option<&str>;

    /// Number of characters
    fn char_count(&self) -> usize;

    /// Character at `offset`; negative offsets count from the end
    fn char_at(&self, offset: isize) -> Option<char>;

    /// Characters in `range`; negative offsets count from the end
    ///
    /// ```rust
    /// use foundationkit_common::text::StrExt;
    ///
    /// let s = "têst_€";
    /// assert_eq!(s.substring(1..3).as_deref(), Some("ês"));
    /// assert_eq!(s.substring(-2..).as_deref(), Some("_€"));
    /// assert_eq!(s.substring(..=0).as_deref(), Some("t"));
    /// ```
    fn substring<R: OffsetRange>(&self, range: R) -> Option<String>;

    /// The string as a file system path
    fn path_buf(&self) -> PathBuf;

    /// The string parsed as a URL
    fn generic_url(&self) -> Option<Url>;

    /// An existing path if one exists at this location, otherwise a URL
    fn resource_location(&self) -> Option<ResourceLocation>;
}

impl StrExt for str {
    fn components_of(&self, length: usize) -> Vec<String> {
        if length == 0 {
            return Vec::new();
        }
        if self.is_empty() {
            return vec![String::new()];
        }

        let chars: Vec<char> = self.chars().collect();
        chars.chunks(length).map(|chunk| chunk.iter().collect()).collect()
    }

    fn abbreviated(&self, length: usize) -> String {
        if self.char_count() <= length {
            return self.to_string();
        }
        if length == 0 {
            return String::new();
        }

        let head: String = self.chars().take(length - 1).collect();
        let mut abbreviated = head.trim().to_string();
        abbreviated.push(ELLIPSIS);
        abbreviated
    }

    fn ascii_lossy(&self) -> String {
        self.chars().map(|c| if c.is_ascii() { c } else { '?' }).collect()
    }

    fn decamelized(&self) -> String {
        let mut output = String::with_capacity(self.len() + 8);
        for (index, c) in self.chars().enumerate() {
            if index == 0 {
                output.extend(c.to_uppercase());
                continue;
            }
            if c.is_uppercase() {
                output.push(' ');
            }
            output.push(c);
        }
        output
    }

    fn non_empty(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self)
    }

    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn char_at(&self, offset: isize) -> Option<char> {
        let index = resolve_offset(offset, self.char_count())?;
        self.chars().nth(index)
    }

    fn substring<R: OffsetRange>(&self, range: R) -> Option<String> {
        let (start, end) = range.resolve(self.char_count())?;
        Some(self.chars().skip(start).take(end - start).collect())
    }

    fn path_buf(&self) -> PathBuf {
        PathBuf::from(self)
    }

    fn generic_url(&self) -> Option<Url> {
        Url::parse(self).ok()
    }

    fn resource_location(&self) -> Option<ResourceLocation> {
        if Path::new(self).exists() {
            Some(ResourceLocation::Path(self.path_buf()))
        } else {
            self.generic_url().map(ResourceLocation::Url)
        }
    }
}

/// Batch conversions on string slices
pub trait StrSliceExt {
    /// Every string as a file system path
    fn path_bufs(&self) -> Vec<PathBuf>;

    /// Locations of the strings that are an existing path or a URL; others
    /// are skipped
    fn resource_locations(&self) -> Vec<ResourceLocation>;
}

impl<S: AsRef<str>> StrSliceExt for [S] {
    fn path_bufs(&self) -> Vec<PathBuf> {
        self.iter().map(|s| s.as_ref().path_buf()).collect()
    }

    fn resource_locations(&self) -> Vec<ResourceLocation> {
        self.iter().filter_map(|s| s.as_ref().resource_location()).collect()
    }
}
