use std::fmt;

// -----------------------------------------------------------------------------------------------

/// Slash separated element names, starting with the name of the root element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl Path {
    pub fn segments(&self) -> &[String] {
        self.segments.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Root name and the names below it.
    pub fn split_first(&self) -> Option<(&str, &[String])> {
        self.segments
            .split_first()
            .map(|(first, rest)| (first.as_str(), rest))
    }
}
