//! The command/response log.
//!
//! Entries are addressed by [`EntryId`], never by position. A write aimed at
//! an id that no longer exists (because `clear` ran in between) does nothing.

use std::fmt;

/// Stable identity of a history entry. Ids grow strictly and are never
/// reused, not even after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One submitted command and its (possibly still revealing) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: EntryId,
    command: String,
    output: String,
    cursor_pos: Option<usize>,
}

impl HistoryEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The line exactly as it was submitted.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The revealed part of the response so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Char offset of the reveal cursor inside `output`, while revealing.
    pub fn cursor_pos(&self) -> Option<usize> {
        self.cursor_pos
    }
}

/// Ordered, id-addressed log of entries. Insertion order is display order.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new entry with empty output and no cursor.
    pub fn append(&mut self, command: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(HistoryEntry {
            id,
            command: command.into(),
            output: String::new(),
            cursor_pos: None,
        });
        id
    }

    /// Replace the output of entry `id`. Returns whether the entry existed.
    pub fn update_output(&mut self, id: EntryId, prefix: &str) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.output.clear();
                entry.output.push_str(prefix);
                true
            }
            None => false,
        }
    }

    /// Replace the cursor of entry `id`. Returns whether the entry existed.
    pub fn update_cursor(&mut self, id: EntryId, pos: Option<usize>) -> bool {
        match self.get_mut(id) {
            Some(entry) => {
                entry.cursor_pos = pos;
                true
            }
            None => false,
        }
    }

    /// Drop every entry at once. The id counter keeps counting.
    pub fn reset(&mut self) -> Vec<EntryId> {
        self.entries.drain(..).map(|entry| entry.id).collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.position(id).map(|idx| &self.entries[idx])
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position(id).is_some()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, id: EntryId) -> Option<&mut HistoryEntry> {
        self.position(id).map(move |idx| &mut self.entries[idx])
    }

    // Ids are strictly increasing, so the vec stays sorted by id.
    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |entry| entry.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_increasing_ids() {
        let mut store = HistoryStore::new();
        let a = store.append("help");
        let b = store.append("projects");
        assert!(a < b);

        let entry = store.get(a).unwrap();
        assert_eq!(entry.command(), "help");
        assert_eq!(entry.output(), "");
        assert_eq!(entry.cursor_pos(), None);
        assert_eq!(
            store.entries().iter().map(|e| e.command()).collect::<Vec<_>>(),
            vec!["help", "projects"]
        );
    }

    #[test]
    fn updates_target_only_their_id() {
        let mut store = HistoryStore::new();
        let a = store.append("a");
        let b = store.append("b");

        assert!(store.update_output(b, "bee"));
        assert!(store.update_cursor(b, Some(2)));

        assert_eq!(store.get(a).unwrap().output(), "");
        assert_eq!(store.get(a).unwrap().cursor_pos(), None);
        assert_eq!(store.get(b).unwrap().output(), "bee");
        assert_eq!(store.get(b).unwrap().cursor_pos(), Some(2));
    }

    #[test]
    fn writes_to_missing_ids_are_noops() {
        let mut store = HistoryStore::new();
        let old = store.append("old");
        store.reset();
        let new = store.append("new");

        assert!(!store.update_output(old, "stale"));
        assert!(!store.update_cursor(old, Some(0)));
        assert_eq!(store.get(new).unwrap().output(), "");
        assert_eq!(store.get(new).unwrap().cursor_pos(), None);
    }

    #[test]
    fn reset_empties_and_never_reuses_ids() {
        let mut store = HistoryStore::new();
        let a = store.append("a");
        let b = store.append("b");
        assert_eq!(store.reset(), vec![a, b]);
        assert!(store.is_empty());

        let c = store.append("c");
        assert!(c > b);
        assert!(!store.contains(a));
        assert_eq!(store.len(), 1);
    }
}
