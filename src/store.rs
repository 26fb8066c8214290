//! Companies, expenses and the theme preference on top of a [`KeyValueStore`].
//!
//! Each collection lives as one JSON array under a fixed key. Every mutation
//! reads the whole array, changes it in memory and writes the whole array
//! back, returning the new list so callers can replace their copy wholesale.
//! Updating or removing an id that is not present is a silent no-op.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Company, Expense, Theme};
use crate::storage::KeyValueStore;

pub const COMPANIES_KEY: &str = "@finance:companies";
pub const EXPENSES_KEY: &str = "@finance:expenses";
pub const THEME_KEY: &str = "@finance:theme";

/// A record kept in one of the persisted collections.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection.
    const KEY: &'static str;
    /// Singular noun used in messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

impl Record for Company {
    const KEY: &'static str = COMPANIES_KEY;
    const KIND: &'static str = "company";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    const KEY: &'static str = EXPENSES_KEY;
    const KIND: &'static str = "expense";

    fn id(&self) -> &str {
        &self.id
    }
}

pub struct Collection<'a, S: KeyValueStore, T: Record> {
    storage: &'a mut S,
    _record: PhantomData<T>,
}

impl<'a, S: KeyValueStore, T: Record> Collection<'a, S, T> {
    /// All records in insertion order; empty if nothing was ever saved.
    /// A stored value that is not a valid JSON array of `T` is an error.
    pub fn list(&self) -> Result<Vec<T>> {
        match self.storage.get_item(T::KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn find(&self, id: &str) -> Result<Option<T>> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Append without any duplicate-id check.
    pub fn add(&mut self, record: T) -> Result<Vec<T>> {
        let mut list = self.list()?;
        list.push(record);
        self.save(&list)?;
        Ok(list)
    }

    /// Replace the record whose id matches `record`'s.
    pub fn update(&mut self, record: T) -> Result<Vec<T>> {
        let list: Vec<T> = self
            .list()?
            .into_iter()
            .map(|r| if r.id() == record.id() { record.clone() } else { r })
            .collect();
        self.save(&list)?;
        Ok(list)
    }

    pub fn remove(&mut self, id: &str) -> Result<Vec<T>> {
        let list: Vec<T> = self.list()?.into_iter().filter(|r| r.id() != id).collect();
        self.save(&list)?;
        Ok(list)
    }

    fn save(&mut self, list: &[T]) -> Result<()> {
        let json = serde_json::to_string(list)?;
        self.storage.set_item(T::KEY, &json)?;
        tracing::debug!(key = T::KEY, len = list.len(), "saved collection");
        Ok(())
    }
}

impl<'a, S: KeyValueStore> Collection<'a, S, Expense> {
    /// Flip the paid flag of one expense.
    pub fn toggle_paid(&mut self, id: &str) -> Result<Vec<Expense>> {
        match self.find(id)? {
            Some(mut expense) => {
                expense.paid = !expense.paid;
                self.update(expense)
            }
            None => self.list(),
        }
    }
}

pub struct RecordStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn companies(&mut self) -> Collection<'_, S, Company> {
        self.collection()
    }

    pub fn expenses(&mut self) -> Collection<'_, S, Expense> {
        self.collection()
    }

    pub fn collection<T: Record>(&mut self) -> Collection<'_, S, T> {
        Collection {
            storage: &mut self.storage,
            _record: PhantomData,
        }
    }

    /// Remove both collections. The theme is left alone.
    pub fn clear_all(&mut self) -> Result<()> {
        self.storage.multi_remove(&[COMPANIES_KEY, EXPENSES_KEY])?;
        tracing::info!("cleared companies and expenses");
        Ok(())
    }

    /// The saved theme, or the default when none (or an unknown value) is stored.
    pub fn get_theme(&self) -> Result<Theme> {
        let theme = self
            .storage
            .get_item(THEME_KEY)?
            .and_then(|v| v.parse::<Theme>().ok())
            .unwrap_or_default();
        Ok(theme)
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        self.storage.set_item(THEME_KEY, theme.as_str())?;
        tracing::debug!(theme = theme.as_str(), "saved theme");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthBucket;
    use crate::models::ExpenseCategory;
    use crate::storage::{MemoryStorage, SqliteStorage};

    fn bucket() -> MonthBucket {
        MonthBucket { month: 4, year: 2025 }
    }

    fn expense(name: &str, amount: f64) -> Expense {
        Expense::new(name, amount, ExpenseCategory::Outros, bucket()).unwrap()
    }

    #[test]
    fn test_list_empty_when_nothing_saved() {
        let mut store = RecordStore::new(MemoryStorage::new());
        assert!(store.companies().list().unwrap().is_empty());
        assert!(store.expenses().list().unwrap().is_empty());
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.expenses().add(expense("Aluguel", 1500.0)).unwrap();
        let list = store.expenses().add(expense("Luz", 120.0)).unwrap();
        let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Aluguel", "Luz"]);
        assert_eq!(store.expenses().list().unwrap(), list);
    }

    #[test]
    fn test_add_is_not_idempotent() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.expenses().add(expense("Luz", 120.0)).unwrap();
        let list = store.expenses().add(expense("Luz", 120.0)).unwrap();
        assert_eq!(list.len(), 2);
        assert_ne!(list[0].id, list[1].id);
    }

    #[test]
    fn test_add_allows_duplicate_ids() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let e = expense("Luz", 120.0);
        store.expenses().add(e.clone()).unwrap();
        let list = store.expenses().add(e).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_replaces_matching_record() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let mut e = expense("Luz", 120.0);
        store.expenses().add(e.clone()).unwrap();
        store.expenses().add(expense("Água", 80.0)).unwrap();
        e.amount = 150.0;
        let list = store.expenses().update(e.clone()).unwrap();
        assert_eq!(list[0], e);
        assert_eq!(list[1].name, "Água");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store.expenses().add(expense("Luz", 120.0)).unwrap();
        let before = store.expenses().list().unwrap();
        let stranger = expense("Ghost", 1.0);
        let after = store.expenses().update(stranger.clone()).unwrap();
        assert_eq!(before, after);
        assert_eq!(store.expenses().update(stranger).unwrap(), before);
    }

    #[test]
    fn test_remove() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let e = expense("Luz", 120.0);
        store.expenses().add(e.clone()).unwrap();
        store.expenses().add(expense("Água", 80.0)).unwrap();
        let list = store.expenses().remove(&e.id).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Água");
        assert_eq!(store.expenses().remove("missing").unwrap(), list);
    }

    #[test]
    fn test_toggle_paid() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let e = expense("Luz", 120.0);
        store.expenses().add(e.clone()).unwrap();
        let list = store.expenses().toggle_paid(&e.id).unwrap();
        assert!(list[0].paid);
        let list = store.expenses().toggle_paid(&e.id).unwrap();
        assert!(!list[0].paid);
    }

    #[test]
    fn test_clear_all_keeps_theme() {
        let mut store = RecordStore::new(MemoryStorage::new());
        store
            .companies()
            .add(Company::new("Acme", 3000.0, None, None).unwrap())
            .unwrap();
        store.expenses().add(expense("Luz", 120.0)).unwrap();
        store.save_theme(Theme::Light).unwrap();

        store.clear_all().unwrap();

        assert!(store.companies().list().unwrap().is_empty());
        assert!(store.expenses().list().unwrap().is_empty());
        assert_eq!(store.get_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        let mut storage = MemoryStorage::new();
        let store = RecordStore::new(storage.clone());
        assert_eq!(store.get_theme().unwrap(), Theme::Dark);

        storage.set_item(THEME_KEY, "sepia").unwrap();
        let store = RecordStore::new(storage);
        assert_eq!(store.get_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(EXPENSES_KEY, "not json").unwrap();
        storage.set_item(COMPANIES_KEY, r#"{"id":"x"}"#).unwrap();
        let mut store = RecordStore::new(storage);
        assert!(matches!(
            store.expenses().list(),
            Err(crate::error::ContasError::Json(_))
        ));
        assert!(store.companies().list().is_err());
    }

    #[test]
    fn test_persisted_layout_is_a_json_array() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let company = Company::new("Acme", 3000.0, Some(500.0), None).unwrap();
        store.companies().add(company.clone()).unwrap();
        let raw = store.storage().get_item(COMPANIES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], company.id.as_str());
        assert_eq!(value[0]["hasVR"], true);
    }

    #[test]
    fn test_sqlite_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contas.db");
        {
            let mut store = RecordStore::new(SqliteStorage::open(&path).unwrap());
            store.expenses().add(expense("Luz", 120.0)).unwrap();
        }
        let mut store = RecordStore::new(SqliteStorage::open(&path).unwrap());
        let list = store.expenses().list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Luz");
    }

    /// Replays a fixed op sequence against a plain Vec and checks the store agrees.
    #[test]
    fn test_matches_reference_model() {
        enum Op {
            Add(&'static str, f64),
            Update(usize, f64),
            Remove(usize),
            UpdateUnknown,
        }
        let ops = [
            Op::Add("a", 1.0),
            Op::Add("b", 2.0),
            Op::Add("c", 3.0),
            Op::Update(1, 20.0),
            Op::Remove(0),
            Op::UpdateUnknown,
            Op::Add("d", 4.0),
            Op::Remove(5),
            Op::Update(0, 200.0),
            Op::Remove(1),
        ];

        let mut store = RecordStore::new(MemoryStorage::new());
        let mut model: Vec<Expense> = Vec::new();
        for op in ops {
            match op {
                Op::Add(name, amount) => {
                    let e = expense(name, amount);
                    model.push(e.clone());
                    store.expenses().add(e).unwrap();
                }
                Op::Update(idx, amount) => {
                    if let Some(existing) = model.get_mut(idx) {
                        existing.amount = amount;
                        store.expenses().update(existing.clone()).unwrap();
                    }
                }
                Op::Remove(idx) => {
                    if idx < model.len() {
                        let removed = model.remove(idx);
                        store.expenses().remove(&removed.id).unwrap();
                    } else {
                        store.expenses().remove("no-such-id").unwrap();
                    }
                }
                Op::UpdateUnknown => {
                    store.expenses().update(expense("zzz", 9.0)).unwrap();
                }
            }
            assert_eq!(store.expenses().list().unwrap(), model);
        }
        let names: Vec<String> = model.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["b", "d"]);
    }

    /// Seeded random add/update/remove runs, including misses, checked the same way.
    #[test]
    fn test_random_ops_match_reference_model() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut store = RecordStore::new(MemoryStorage::new());
            let mut model: Vec<Expense> = Vec::new();
            for step in 0..40 {
                match rng.gen_range(0..4) {
                    0 => {
                        let amount = rng.gen_range(1..100_000) as f64 / 100.0;
                        let e = expense(&format!("e{step}"), amount);
                        model.push(e.clone());
                        store.expenses().add(e).unwrap();
                    }
                    1 if !model.is_empty() => {
                        let idx = rng.gen_range(0..model.len());
                        model[idx].amount = rng.gen_range(1..100_000) as f64 / 100.0;
                        model[idx].paid = rng.gen_bool(0.5);
                        store.expenses().update(model[idx].clone()).unwrap();
                    }
                    2 if !model.is_empty() => {
                        let idx = rng.gen_range(0..model.len());
                        let removed = model.remove(idx);
                        store.expenses().remove(&removed.id).unwrap();
                    }
                    _ => {
                        store.expenses().update(expense("ghost", 1.0)).unwrap();
                        store.expenses().remove("no-such-id").unwrap();
                    }
                }
                assert_eq!(store.expenses().list().unwrap(), model, "seed {seed}, step {step}");
            }
        }
    }
}
