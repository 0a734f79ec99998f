use crate::SectionLabel;

/// A single, independently transmitted unit of a progressive stream.
///
/// On the wire each frame is one line of JSON:
///
/// ```text
/// {"generated_response":"ז","section_name":"Summary"}
/// {"generated_link":"id1","section_name":"Summary"}
/// {"generated_link":null,"section_name":"Conclusion"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StreamFrame {
    /// One character of the generated answer.
    Character {
        #[cfg_attr(feature = "serde", serde(rename = "generated_response"))]
        character: char,
        #[cfg_attr(feature = "serde", serde(rename = "section_name"))]
        section: SectionLabel,
    },
    /// End-of-segment link notification. `link_id` is `None` once the
    /// stream's correlation pool is exhausted.
    Link {
        #[cfg_attr(feature = "serde", serde(rename = "generated_link"))]
        link_id: Option<String>,
        #[cfg_attr(feature = "serde", serde(rename = "section_name"))]
        section: SectionLabel,
    },
}

impl StreamFrame {
    #[must_use]
    pub const fn section(&self) -> SectionLabel {
        match self {
            Self::Character { section, .. } | Self::Link { section, .. } => *section,
        }
    }

    /// Returns the character carried by a character frame.
    #[must_use]
    pub const fn character(&self) -> Option<char> {
        match self {
            Self::Character { character, .. } => Some(*character),
            Self::Link { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Encodes the frame as a single newline-terminated JSON line.
    ///
    /// The returned buffer always holds a complete frame, so it can be handed
    /// to a transport as one atomic write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, which does not happen for the
    /// frame shapes defined here.
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[cfg(feature = "serde")]
    pub fn to_ndjson(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}
