//! Storage Module Tests
//!
//! Validates the frequency store contract against both implementations.
//!
//! ## Test Scopes
//! - **SqliteFrequencyStore**: Schema setup, durable writes, partial-failure commits.
//! - **MemoryFrequencyStore**: Same query contract without a file.
//! - **Ordering**: Rank order is count descending with a stable word tie-break.

#[cfg(test)]
mod tests {
    use crate::analysis::frequency::WordFrequencies;
    use crate::error::StorageError;
    use crate::storage::memory::MemoryFrequencyStore;
    use crate::storage::sqlite::SqliteFrequencyStore;
    use crate::storage::types::{FrequencyStore, WordCount};
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn frequencies(pairs: &[(&str, u32)]) -> WordFrequencies {
        pairs
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    fn sqlite_store() -> (TempDir, SqliteFrequencyStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteFrequencyStore::new(dir.path().join("ebooks.db"));
        store.initialize().unwrap();
        (dir, store)
    }

    // ============================================================
    // SQLITE STORE TESTS
    // ============================================================

    #[test]
    fn test_sqlite_initialize_is_idempotent() {
        let (_dir, store) = sqlite_store();

        store.initialize().unwrap();
        store.initialize().unwrap();

        store.insert("x", &frequencies(&[("word", 1)])).unwrap();
        assert_eq!(store.query("x", 1).unwrap(), vec![WordCount::new("word", 1)]);
    }

    #[test]
    fn test_sqlite_round_trip_ranked() {
        let (_dir, store) = sqlite_store();

        let inserted = store
            .insert("x", &frequencies(&[("the", 5), ("a", 3)]))
            .unwrap();
        assert_eq!(inserted, 2);

        let words = store.query("x", 1).unwrap();
        assert_eq!(words, vec![WordCount::new("the", 5), WordCount::new("a", 3)]);
    }

    #[test]
    fn test_sqlite_exists_before_and_after_insert() {
        let (_dir, store) = sqlite_store();

        assert!(!store.exists("moby dick").unwrap());
        store
            .insert("moby dick", &frequencies(&[("whale", 7)]))
            .unwrap();
        assert!(store.exists("moby dick").unwrap());

        // Other titles are unaffected
        assert!(!store.exists("emma").unwrap());
    }

    #[test]
    fn test_sqlite_query_unknown_book_is_empty() {
        let (_dir, store) = sqlite_store();
        assert!(store.query("never ingested", 1).unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_query_applies_min_frequency() {
        let (_dir, store) = sqlite_store();
        store
            .insert("x", &frequencies(&[("rare", 1), ("common", 4), ("mid", 2)]))
            .unwrap();

        let words = store.query("x", 2).unwrap();
        assert_eq!(
            words,
            vec![WordCount::new("common", 4), WordCount::new("mid", 2)]
        );
    }

    #[test]
    fn test_sqlite_tie_break_is_lexicographic_and_stable() {
        let (_dir, store) = sqlite_store();
        store
            .insert("x", &frequencies(&[("b", 2), ("z", 5), ("a", 2), ("c", 2)]))
            .unwrap();

        let first = store.query("x", 1).unwrap();
        let second = store.query("x", 1).unwrap();

        let order: Vec<&str> = first.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "b", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sqlite_books_are_isolated() {
        let (_dir, store) = sqlite_store();
        store.insert("one", &frequencies(&[("alpha", 3)])).unwrap();
        store.insert("two", &frequencies(&[("beta", 9)])).unwrap();

        assert_eq!(store.query("one", 1).unwrap(), vec![WordCount::new("alpha", 3)]);
        assert_eq!(store.query("two", 1).unwrap(), vec![WordCount::new("beta", 9)]);
    }

    #[test]
    fn test_sqlite_store_does_not_deduplicate_inserts() {
        let (_dir, store) = sqlite_store();
        let counts = frequencies(&[("word", 2)]);

        store.insert("x", &counts).unwrap();
        store.insert("x", &counts).unwrap();

        assert_eq!(store.query("x", 1).unwrap().len(), 2);
    }

    #[test]
    fn test_sqlite_insert_if_absent_writes_once() {
        let (_dir, store) = sqlite_store();
        let counts = frequencies(&[("word", 2), ("other", 1)]);

        assert_eq!(store.insert_if_absent("x", &counts).unwrap(), Some(2));
        assert_eq!(store.insert_if_absent("x", &counts).unwrap(), None);
        assert_eq!(store.query("x", 1).unwrap().len(), 2);

        // Other titles are still writable
        assert_eq!(store.insert_if_absent("y", &counts).unwrap(), Some(2));
    }

    #[test]
    fn test_sqlite_data_survives_new_handle() {
        let (dir, store) = sqlite_store();
        store.insert("x", &frequencies(&[("kept", 1)])).unwrap();
        drop(store);

        let reopened = SqliteFrequencyStore::new(dir.path().join("ebooks.db"));
        reopened.initialize().unwrap();
        assert!(reopened.exists("x").unwrap());
    }

    #[test]
    fn test_sqlite_reset_removes_every_book() {
        let (_dir, store) = sqlite_store();
        store.insert("one", &frequencies(&[("alpha", 3)])).unwrap();
        store.insert("two", &frequencies(&[("beta", 9)])).unwrap();

        store.reset().unwrap();

        assert!(!store.exists("one").unwrap());
        assert!(!store.exists("two").unwrap());

        // Still usable without another initialize
        store.insert("three", &frequencies(&[("gamma", 1)])).unwrap();
        assert!(store.exists("three").unwrap());
    }

    #[test]
    fn test_sqlite_partial_insert_commits_earlier_rows() {
        let (dir, store) = sqlite_store();

        let conn = rusqlite::Connection::open(dir.path().join("ebooks.db")).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON ebooks WHEN NEW.word = 'boom' \
             BEGIN SELECT RAISE(ABORT, 'rejected word'); END;",
        )
        .unwrap();
        drop(conn);

        let counts = frequencies(&[("alpha", 1), ("boom", 2), ("gamma", 3), ("delta", 4)]);
        let err = store.insert("x", &counts).unwrap_err();

        let inserted = match err {
            StorageError::PartialInsert { book, inserted, .. } => {
                assert_eq!(book, "x");
                inserted
            }
            other => panic!("expected PartialInsert, got {other:?}"),
        };

        let words = store.query("x", 1).unwrap();
        assert_eq!(words.len(), inserted);
        assert!(words.iter().all(|w| w.word != "boom"));
    }

    #[test]
    fn test_sqlite_unreachable_path_reports_error() {
        let dir = TempDir::new().unwrap();
        let store = SqliteFrequencyStore::new(dir.path().join("missing").join("ebooks.db"));

        assert!(matches!(store.initialize(), Err(StorageError::Database(_))));
        assert!(store.exists("x").is_err());
        assert!(store.query("x", 1).is_err());
    }

    #[test]
    fn test_sqlite_query_before_initialize_reports_error() {
        let dir = TempDir::new().unwrap();
        let store = SqliteFrequencyStore::new(dir.path().join("ebooks.db"));

        assert!(store.query("x", 1).is_err());
    }

    // ============================================================
    // MEMORY STORE TESTS
    // ============================================================

    #[test]
    fn test_memory_round_trip_ranked() {
        let store = MemoryFrequencyStore::new();
        store.initialize().unwrap();
        store
            .insert("x", &frequencies(&[("a", 3), ("the", 5)]))
            .unwrap();

        assert_eq!(
            store.query("x", 1).unwrap(),
            vec![WordCount::new("the", 5), WordCount::new("a", 3)]
        );
    }

    #[test]
    fn test_memory_exists_requires_rows() {
        let store = MemoryFrequencyStore::new();

        store.insert("empty", &WordFrequencies::new()).unwrap();
        assert!(!store.exists("empty").unwrap());

        store.insert("full", &frequencies(&[("w", 1)])).unwrap();
        assert!(store.exists("full").unwrap());
    }

    #[test]
    fn test_memory_insert_if_absent_writes_once() {
        let store = MemoryFrequencyStore::new();
        let counts = frequencies(&[("word", 2), ("other", 1)]);

        assert_eq!(store.insert_if_absent("x", &counts).unwrap(), Some(2));
        assert_eq!(store.insert_if_absent("x", &counts).unwrap(), None);
        assert_eq!(store.record_count(), 2);
    }

    #[test]
    fn test_memory_reset_clears_all_rows() {
        let store = MemoryFrequencyStore::new();
        store.insert("one", &frequencies(&[("a", 1), ("b", 2)])).unwrap();
        store.insert("two", &frequencies(&[("c", 3)])).unwrap();
        assert_eq!(store.record_count(), 3);

        store.reset().unwrap();

        assert_eq!(store.record_count(), 0);
        assert!(store.query("one", 1).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_query_is_rank_ordered(
            counts in prop::collection::hash_map("[a-f]{1,3}", 1u32..20, 0..40),
            min_frequency in 1u32..5,
        ) {
            let store = MemoryFrequencyStore::new();
            store.insert("book", &counts).unwrap();

            let words = store.query("book", min_frequency).unwrap();
            prop_assert!(words.iter().all(|w| w.count >= min_frequency));
            for pair in words.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
                if pair[0].count == pair[1].count {
                    prop_assert!(pair[0].word < pair[1].word);
                }
            }
            prop_assert_eq!(words, store.query("book", min_frequency).unwrap());
        }
    }
}
