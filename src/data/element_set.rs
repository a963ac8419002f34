//! Orbital element set data structures

/// One object's display name plus its two fixed-width element lines.
///
/// Immutable once fetched; created by a single feed download per process
/// run and passed by value to every consumer.
#[derive(Debug, Clone)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}
