//! Manages the canonical ordered collection of notes.
//!
//! [`NoteStore`] owns the in-memory list, keeps it newest-first, and writes
//! the full collection back to the key-value backend on every mutation.

use std::{fmt, str::FromStr};

use chrono::Utc;
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use log::{debug, info, warn};

use crate::{Category, KeepError, Note, NoteId, Result, SharedStore, DEFAULT_TITLE};

/// Key under which the serialized note collection is persisted.
pub const NOTES_KEY: &str = "todos";

/// Narrows a query to one category, or spans them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Owns the authoritative in-memory list of notes and guarantees every
/// mutation is reflected in persisted state before the operation returns.
///
/// When a persist fails, the in-memory change is rolled back, so callers
/// never observe memory and disk disagreeing.
pub struct NoteStore {
    /// Persistence backend shared with the rest of the application
    store: SharedStore,

    /// Live collection, newest first
    notes: Vec<Note>,

    /// Next id to hand out, strictly monotonic within this store
    next_id: NoteId,
}

impl NoteStore {
    /// Opens a store over the given backend, loading any persisted notes.
    ///
    /// An absent or malformed payload is treated as "no notes yet" rather
    /// than a fatal error; the id counter resumes above the highest id
    /// found.
    pub fn open(store: SharedStore) -> Self {
        let notes = match Self::load(&store) {
            Ok(notes) => notes,
            Err(e) => {
                warn!("Discarding unreadable note payload: {}", e);
                Vec::new()
            }
        };

        let next_id = notes.iter().map(|n| n.id).max().map_or(1, |id| id + 1);
        info!("Loaded {} notes", notes.len());

        Self {
            store,
            notes,
            next_id,
        }
    }

    fn load(store: &SharedStore) -> Result<Vec<Note>> {
        match store.borrow().get(NOTES_KEY)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Serializes the entire collection and overwrites the persisted copy.
    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.notes)?;
        self.store.borrow_mut().set(NOTES_KEY, &payload)
    }

    fn position(&self, id: NoteId) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(KeepError::NoteNotFound { id })
    }

    /// Creates a note and inserts it at the front of the collection.
    ///
    /// Title and content are trimmed first. If both come out empty the
    /// operation fails with [`KeepError::EmptyNote`] and nothing changes.
    /// An empty title alone is replaced with [`DEFAULT_TITLE`].
    pub fn create(&mut self, title: &str, content: &str, category: Category) -> Result<Note> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() && content.is_empty() {
            return Err(KeepError::EmptyNote);
        }

        let note = Note::new(self.next_id, title, content, category);
        self.next_id += 1;
        self.notes.insert(0, note);

        if let Err(e) = self.persist() {
            // Persist failed: undo the insert so memory matches disk.
            self.notes.remove(0);
            self.next_id -= 1;
            return Err(e);
        }

        info!("Created note {}", self.notes[0].id);
        Ok(self.notes[0].clone())
    }

    /// Flips the completion state of the note with the given id.
    pub fn toggle_complete(&mut self, id: NoteId) -> Result<Note> {
        let idx = self.position(id)?;
        let previous = self.notes[idx].clone();

        let note = &mut self.notes[idx];
        note.completed = !note.completed;
        note.updated_at = Utc::now();

        if let Err(e) = self.persist() {
            self.notes[idx] = previous;
            return Err(e);
        }

        debug!(
            "Toggled note {} to completed={}",
            id, self.notes[idx].completed
        );
        Ok(self.notes[idx].clone())
    }

    /// Replaces the title, content, and category of an existing note.
    ///
    /// Normalization matches [`NoteStore::create`] except that an edit may
    /// legitimately blank both fields; only the title falls back to
    /// [`DEFAULT_TITLE`].
    pub fn update(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
        category: Category,
    ) -> Result<Note> {
        let idx = self.position(id)?;
        let previous = self.notes[idx].clone();

        let title = title.trim();
        let note = &mut self.notes[idx];
        note.title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
        note.content = content.trim().to_string();
        note.category = category;
        note.updated_at = Utc::now();

        if let Err(e) = self.persist() {
            self.notes[idx] = previous;
            return Err(e);
        }

        info!("Updated note {}", id);
        Ok(self.notes[idx].clone())
    }

    /// Removes a note permanently. There is no recovery path; a second
    /// delete of the same id reports [`KeepError::NoteNotFound`].
    pub fn delete(&mut self, id: NoteId) -> Result<Note> {
        let idx = self.position(id)?;
        let removed = self.notes.remove(idx);

        if let Err(e) = self.persist() {
            self.notes.insert(idx, removed);
            return Err(e);
        }

        info!("Deleted note {}", id);
        Ok(removed)
    }

    /// Returns the notes matching `filter` and `search`, newest first.
    ///
    /// Read-only: never touches the persistence backend, safe to call
    /// repeatedly with different arguments. The search term is matched
    /// case-insensitively as a substring of the title or the content; an
    /// empty or whitespace-only term matches everything. Both filters
    /// compose with logical AND.
    pub fn query(&self, filter: CategoryFilter, search: &str) -> Vec<&Note> {
        let term = search.trim().to_lowercase();

        self.notes
            .iter()
            .filter(|note| filter.accepts(note.category))
            .filter(|note| {
                term.is_empty()
                    || note.title.to_lowercase().contains(&term)
                    || note.content.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Relevance-ranked search across titles and content.
    ///
    /// Title matches are weighted twice as heavily as content matches;
    /// notes that match neither field are dropped.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let matcher = SkimMatcherV2::default();

        let mut scored: Vec<(i64, &Note)> = self
            .notes
            .iter()
            .filter_map(|note| {
                let title_score = matcher.fuzzy_match(&note.title, query).unwrap_or(0);
                let content_score = matcher.fuzzy_match(&note.content, query).unwrap_or(0);
                let score = title_score * 2 + content_score;
                (score > 0).then_some((score, note))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        debug!("Search '{}' matched {} notes", query, scored.len());
        scored.into_iter().map(|(_, note)| note).collect()
    }

    /// Looks up a single note by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::HashSet,
        rc::Rc,
        thread::sleep,
        time::Duration,
    };

    use super::*;
    use crate::{KeyValueStore, MemoryStore};

    fn store() -> NoteStore {
        NoteStore::open(Rc::new(RefCell::new(MemoryStore::new())))
    }

    #[test]
    fn create_rejects_empty_input() {
        let mut notes = store();
        let err = notes.create("  ", "\t", Category::Personal).unwrap_err();
        assert!(matches!(err, KeepError::EmptyNote));
        assert!(notes.is_empty());
    }

    #[test]
    fn create_defaults_empty_title() {
        let mut notes = store();
        let note = notes.create("", "buy milk", Category::Personal).unwrap();
        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.content, "buy milk");
    }

    #[test]
    fn created_ids_are_pairwise_distinct() {
        let mut notes = store();
        let mut ids = HashSet::new();
        for i in 0..20 {
            let note = notes
                .create(&format!("note {i}"), "", Category::Other)
                .unwrap();
            assert!(ids.insert(note.id));
        }
    }

    #[test]
    fn newest_note_comes_first() {
        let mut notes = store();
        notes.create("first", "", Category::Personal).unwrap();
        notes.create("second", "", Category::Personal).unwrap();

        let all = notes.query(CategoryFilter::All, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "second");
        assert_eq!(all[1].title, "first");
    }

    #[test]
    fn filters_compose_with_and() {
        let mut notes = store();
        notes.create("foo", "", Category::Work).unwrap();
        notes.create("foobar", "", Category::Personal).unwrap();

        let hits = notes.query(CategoryFilter::Only(Category::Work), "foo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "foo");

        let hits = notes.query(CategoryFilter::All, "bar");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "foobar");
    }

    #[test]
    fn search_term_is_case_insensitive_and_spans_both_fields() {
        let mut notes = store();
        notes.create("Groceries", "", Category::Personal).unwrap();
        notes.create("calls", "ring MOM back", Category::Personal).unwrap();

        assert_eq!(notes.query(CategoryFilter::All, "GROC").len(), 1);
        assert_eq!(notes.query(CategoryFilter::All, "mom").len(), 1);
        assert_eq!(notes.query(CategoryFilter::All, "   ").len(), 2);
    }

    #[test]
    fn toggle_flips_state_and_advances_updated_at() {
        let mut notes = store();
        let created = notes.create("task", "", Category::Work).unwrap();

        sleep(Duration::from_millis(5));
        let once = notes.toggle_complete(created.id).unwrap();
        assert!(once.completed);
        assert!(once.updated_at > created.updated_at);

        sleep(Duration::from_millis(5));
        let twice = notes.toggle_complete(created.id).unwrap();
        assert!(!twice.completed);
        assert!(twice.updated_at > once.updated_at);
        assert!(twice.updated_at >= twice.created_at);
    }

    #[test]
    fn update_refreshes_fields_and_keeps_sentinel_title() {
        let mut notes = store();
        let created = notes
            .create("shopping", "eggs and flour", Category::Personal)
            .unwrap();

        sleep(Duration::from_millis(5));
        let updated = notes.update(created.id, "", "", Category::Work).unwrap();
        assert_eq!(updated.title, DEFAULT_TITLE);
        assert_eq!(updated.content, "");
        assert_eq!(updated.category, Category::Work);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn unknown_ids_are_reported_without_mutation() {
        let mut notes = store();
        notes.create("keep me", "", Category::Ideas).unwrap();

        assert!(matches!(
            notes.toggle_complete(999).unwrap_err(),
            KeepError::NoteNotFound { id: 999 }
        ));
        assert!(matches!(
            notes.update(999, "x", "y", Category::Other).unwrap_err(),
            KeepError::NoteNotFound { id: 999 }
        ));
        assert!(matches!(
            notes.delete(999).unwrap_err(),
            KeepError::NoteNotFound { id: 999 }
        ));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn delete_is_permanent() {
        let mut notes = store();
        let note = notes.create("doomed", "", Category::Other).unwrap();

        notes.delete(note.id).unwrap();
        assert!(notes.query(CategoryFilter::All, "").is_empty());
        assert!(matches!(
            notes.delete(note.id).unwrap_err(),
            KeepError::NoteNotFound { .. }
        ));
    }

    #[test]
    fn collection_round_trips_through_the_backend() {
        let backing = Rc::new(RefCell::new(MemoryStore::new()));

        let first: Vec<Note> = {
            let mut notes = NoteStore::open(backing.clone());
            notes.create("a", "alpha", Category::Work).unwrap();
            notes.create("b", "beta", Category::Ideas).unwrap();
            notes.toggle_complete(1).unwrap();
            notes
                .query(CategoryFilter::All, "")
                .into_iter()
                .cloned()
                .collect()
        };

        let reopened = NoteStore::open(backing);
        let second: Vec<Note> = reopened
            .query(CategoryFilter::All, "")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn id_counter_resumes_above_loaded_ids() {
        let backing = Rc::new(RefCell::new(MemoryStore::new()));

        {
            let mut notes = NoteStore::open(backing.clone());
            notes.create("one", "", Category::Personal).unwrap();
            notes.create("two", "", Category::Personal).unwrap();
        }

        let mut notes = NoteStore::open(backing);
        let note = notes.create("three", "", Category::Personal).unwrap();
        assert_eq!(note.id, 3);
    }

    #[test]
    fn malformed_payload_loads_as_empty_collection() {
        let backing = Rc::new(RefCell::new(MemoryStore::new()));
        backing
            .borrow_mut()
            .set(NOTES_KEY, "this is not an array")
            .unwrap();

        let notes = NoteStore::open(backing);
        assert!(notes.is_empty());
    }

    #[test]
    fn ranked_search_prefers_title_matches() {
        let mut notes = store();
        notes
            .create("other", "release checklist", Category::Work)
            .unwrap();
        notes.create("release", "notes", Category::Work).unwrap();

        let hits = notes.search("release");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "release");
        assert!(notes.search("zzzqqq").is_empty());
    }

    /// Backend whose writes can be made to fail on demand.
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> crate::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
            if self.fail_writes.get() {
                return Err(KeepError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "injected write failure",
                )));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn failed_persist_rolls_the_mutation_back() {
        let fail_writes = Rc::new(Cell::new(false));
        let backing = Rc::new(RefCell::new(FlakyStore {
            inner: MemoryStore::new(),
            fail_writes: fail_writes.clone(),
        }));

        let mut notes = NoteStore::open(backing);
        let kept = notes.create("keep", "", Category::Work).unwrap();

        fail_writes.set(true);
        assert!(notes.create("lost", "", Category::Work).is_err());
        assert!(notes.toggle_complete(kept.id).is_err());
        assert!(notes.update(kept.id, "x", "y", Category::Other).is_err());
        assert!(notes.delete(kept.id).is_err());

        let all = notes.query(CategoryFilter::All, "");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], &kept);
    }
}
