use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// A pull-to-refresh surface manages exactly one child.
    MultipleChildren { count: usize },
    /// The operation needs the managed child and none is attached.
    NoContent,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::MultipleChildren { count } => {
                write!(f, "pull-to-refresh surface can host only one direct child, found {count}")
            }
            LayoutError::NoContent => write!(f, "pull-to-refresh surface has no content child"),
        }
    }
}

impl std::error::Error for LayoutError {}
