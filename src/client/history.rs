//! Navigation history: visited paths and a cursor into them.

/// Stack of visited paths with back/forward movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Visited paths, oldest first. Never empty.
    entries: Vec<String>,
    /// Index of the current entry.
    cursor: usize,
}

impl History {
    /// History holding only `initial_path`.
    #[must_use]
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![initial_path.to_owned()],
            cursor: 0,
        }
    }

    /// The current path.
    #[must_use]
    pub fn current(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map_or("/", String::as_str)
    }

    /// Visit `path`, discarding anything ahead of the cursor.
    pub fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_owned());
        self.cursor = self.entries.len() - 1;
    }

    /// Step back. `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.current())
    }

    /// Step forward. `None` when already at the newest entry.
    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}
