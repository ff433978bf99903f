use std::fmt::{self, Display, Formatter};

/// The printable name of a stream: a path, a URL, or `-`. Streams hand these
/// out for diagnostics without exposing how they were opened.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pseudonym {
    pub(crate) name: String,
}

impl Pseudonym {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }
}

impl Display for Pseudonym {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
