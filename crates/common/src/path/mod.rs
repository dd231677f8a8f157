//! File system path helpers
//!
//! Nothing here touches the file system; every helper works on path text.
//! See [`fs`](crate::fs) for helpers that stat or modify files.

use std::path::{is_separator, Component, Path, PathBuf};

use crate::impl_choice;

/// Path notation used when rendering a path for another platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `/` separated
    Posix,
    /// `\\` separated, with drive letters
    Windows,
}

impl_choice!(PathStyle {
    Posix => "POSIX",
    Windows => "Windows",
});

impl PathStyle {
    /// Separator between components in this style
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }
}

/// Helpers on borrowed paths
pub trait PathExt {
    /// The path with every component of `components` appended in order
    fn appending_path_components<I, S>(&self, components: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>;

    /// Whether the path text ends with a separator
    fn has_directory_path(&self) -> bool;

    /// Last component as text, empty for roots and empty paths
    fn last_path_component(&self) -> String;

    /// The path text with separators rewritten for `style`
    fn platform_path(&self, style: PathStyle) -> String;
}

impl PathExt for Path {
    fn appending_path_components<I, S>(&self, components: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut path = self.to_path_buf();
        path.append_path_components(components);
        path
    }

    fn has_directory_path(&self) -> bool {
        self.to_string_lossy().chars().last().is_some_and(is_separator)
    }

    fn last_path_component(&self) -> String {
        self.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
    }

    fn platform_path(&self, style: PathStyle) -> String {
        self.to_string_lossy()
            .chars()
            .map(|c| if is_separator(c) || c == '/' || c == '\\' { style.separator() } else { c })
            .collect()
    }
}

/// In-place helpers on owned paths
pub trait PathBufExt {
    /// Append every component of `components` in order
    fn append_path_components<I, S>(&mut self, components: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>;
}

impl PathBufExt for PathBuf {
    fn append_path_components<I, S>(&mut self, components: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        for component in components {
            self.push(component);
        }
    }
}

/// Directory a path stands for: itself when written with a trailing
/// separator, otherwise its parent
fn directory_of(path: &Path) -> &Path {
    if path.has_directory_path() {
        path
    } else {
        path.parent().unwrap_or(Path::new(""))
    }
}

/// Deepest directory containing every path in `paths`
///
/// Each path contributes its own directory (see [`PathExt::has_directory_path`])
/// and the result is the longest shared run of leading components. The
/// result does not depend on input order. Returns `None` for an empty input
/// or when the paths share no leading component.
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use foundationkit_common::path::common_parent_directory;
///
/// let paths = [Path::new("/a/b/file.txt"), Path::new("/a/c/d/other.txt")];
/// assert_eq!(common_parent_directory(&paths), Some(PathBuf::from("/a")));
/// ```
#[must_use]
pub fn common_parent_directory<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    let mut directories = paths.iter().map(|path| directory_of(path.as_ref()));
    let first = directories.next()?;
    let mut common: Vec<Component<'_>> = first.components().collect();

    for directory in directories {
        let shared = common
            .iter()
            .zip(directory.components())
            .take_while(|(left, right)| *left == right)
            .count();
        common.truncate(shared);
    }

    if common.is_empty() {
        None
    } else {
        Some(common.iter().collect())
    }
}

/// Helpers on slices of paths
pub trait PathSliceExt {
    /// Deepest directory containing every path
    fn common_parent_directory(&self) -> Option<PathBuf>;

    /// Paths ordered by their last component
    fn alphabetically_ordered(&self) -> Vec<PathBuf>;

    /// Every path as text
    fn paths(&self) -> Vec<String>;

    /// Last component of every path
    fn last_path_components(&self) -> Vec<String>;
}

impl<P: AsRef<Path>> PathSliceExt for [P] {
    fn common_parent_directory(&self) -> Option<PathBuf> {
        common_parent_directory(self)
    }

    fn alphabetically_ordered(&self) -> Vec<PathBuf> {
        let mut ordered: Vec<PathBuf> = self.iter().map(|path| path.as_ref().to_path_buf()).collect();
        ordered.sort_by_cached_key(|path| path.last_path_component());
        ordered
    }

    fn paths(&self) -> Vec<String> {
        self.iter().map(|path| path.as_ref().to_string_lossy().into_owned()).collect()
    }

    fn last_path_components(&self) -> Vec<String> {
        self.iter().map(|path| path.as_ref().last_path_component()).collect()
    }
}
