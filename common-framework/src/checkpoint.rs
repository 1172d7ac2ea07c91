/// A saved cursor offset for backtracking.
///
/// The scanner keeps at most one of these at a time; storing a new one
/// overwrites the previous slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset at the time the checkpoint was taken.
    offset: usize,
}

impl Checkpoint {
    /// Creates a checkpoint for the given byte offset.
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
