/// Submitted lines, oldest first, with a recall cursor.
///
/// The cursor counts steps back from the newest entry; `None` means nothing
/// is being recalled. Walking the cursor never changes the stored entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Steps one entry further into the past, stopping at the oldest.
    /// Returns the selected entry, or `None` when there is no history.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let oldest = self.entries.len() - 1;
        let next = match self.cursor {
            None => 0,
            Some(steps) => (steps + 1).min(oldest),
        };
        self.cursor = Some(next);
        self.selected()
    }

    /// Steps one entry toward the present. Moving past the newest entry
    /// deselects and returns `None`.
    pub fn recall_next(&mut self) -> Option<&str> {
        match self.cursor {
            Some(steps) if steps > 0 => {
                self.cursor = Some(steps - 1);
                self.selected()
            }
            _ => {
                self.cursor = None;
                None
            }
        }
    }

    fn selected(&self) -> Option<&str> {
        let steps = self.cursor?;
        let index = self.entries.len().checked_sub(1 + steps)?;
        self.entries.get(index).map(String::as_str)
    }
}
