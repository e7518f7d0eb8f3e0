//! Object and array bodies.
//!
//! Both containers keep insertion order, which is also iteration and
//! serialization order. Every mutation validates first and applies second,
//! so a rejected call leaves the container and its listeners untouched.
//!
//! Children are owned exclusively. There is no `&mut Value` access into a
//! container; nested containers are reached with `object_mut`/`array_mut`
//! and mutated through their own API, which raises events on that child
//! only.

use crate::error::{JsonError, Result};
use crate::notify::{ChangeEvent, ChangeKey, ChangeKind, ChangePhase, ListenerId, Listeners};
use crate::value::Value;
use std::slice;
use std::sync::Arc;

fn check_storable(value: &Value) -> Result<()> {
    if value.is_undefined() {
        return Err(JsonError::InvalidArgument(
            "undefined cannot be stored in a container".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Object
// ============================================================================

/// An ordered map of unique, case-sensitive keys to values.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
    listeners: Listeners,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an object from ordered pairs. Fails on the first duplicate key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Object>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut object = Object::new();
        object.add_range(pairs)?;
        Ok(object)
    }

    /// Wrap entries already known to have unique keys and no undefined
    /// values.
    pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Object {
        Object {
            entries,
            listeners: Listeners::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The nested object stored under `key`, for in-place mutation.
    pub fn object_mut(&mut self, key: &str) -> Option<&mut Object> {
        let i = self.position(key)?;
        self.entries[i].1.as_object_mut()
    }

    /// The nested array stored under `key`, for in-place mutation.
    pub fn array_mut(&mut self, key: &str) -> Option<&mut Array> {
        let i = self.position(key)?;
        self.entries[i].1.as_array_mut()
    }

    /// Insert `value` under `key`, replacing any existing value.
    ///
    /// Raises `Add` when the key was absent and `Replace` when present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        check_storable(&value)?;
        match self.position(&key) {
            Some(i) => {
                let dispatch = self.listeners.snapshot();
                let name = ChangeKey::Name(&key);
                dispatch.raise(
                    ChangePhase::Changing,
                    ChangeKind::Replace,
                    Some(name),
                    Some(&value),
                );
                self.entries[i].1 = value;
                dispatch.raise(
                    ChangePhase::Changed,
                    ChangeKind::Replace,
                    Some(name),
                    Some(&self.entries[i].1),
                );
            }
            None => self.push(key, value),
        }
        Ok(())
    }

    /// Insert `value` under a key that must not exist yet.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        if self.contains_key(&key) {
            return Err(JsonError::DuplicateKey(key));
        }
        check_storable(&value)?;
        self.push(key, value);
        Ok(())
    }

    /// Add every pair in order. All pairs are validated, including duplicates
    /// within the batch, before anything is inserted.
    pub fn add_range<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let pairs: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (i, (key, value)) in pairs.iter().enumerate() {
            if self.contains_key(key) || pairs[..i].iter().any(|(k, _)| k == key) {
                return Err(JsonError::DuplicateKey(key.clone()));
            }
            check_storable(value)?;
        }
        for (key, value) in pairs {
            self.push(key, value);
        }
        Ok(())
    }

    fn push(&mut self, key: String, value: Value) {
        let dispatch = self.listeners.snapshot();
        dispatch.raise(
            ChangePhase::Changing,
            ChangeKind::Add,
            Some(ChangeKey::Name(&key)),
            Some(&value),
        );
        self.entries.push((key, value));
        if let Some((key, value)) = self.entries.last() {
            dispatch.raise(
                ChangePhase::Changed,
                ChangeKind::Add,
                Some(ChangeKey::Name(key)),
                Some(value),
            );
        }
    }

    /// Remove `key`. Returns false, raising nothing, when it is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(i) = self.position(key) else {
            return false;
        };
        let dispatch = self.listeners.snapshot();
        let (name, current) = &self.entries[i];
        dispatch.raise(
            ChangePhase::Changing,
            ChangeKind::Remove,
            Some(ChangeKey::Name(name)),
            Some(current),
        );
        let (name, removed) = self.entries.remove(i);
        dispatch.raise(
            ChangePhase::Changed,
            ChangeKind::Remove,
            Some(ChangeKey::Name(&name)),
            Some(&removed),
        );
        true
    }

    pub fn clear(&mut self) {
        let dispatch = self.listeners.snapshot();
        dispatch.raise(ChangePhase::Changing, ChangeKind::Clear, None, None);
        self.entries.clear();
        dispatch.raise(ChangePhase::Changed, ChangeKind::Clear, None, None);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> ObjectIter<'_> {
        ObjectIter(self.entries.iter())
    }

    /// Register a listener for mutations of this object.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&ChangeEvent<'_>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Objects are equal when they hold the same keys mapped to equal values.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

/// Ordered `(key, value)` iteration over an [`Object`].
#[derive(Debug, Clone)]
pub struct ObjectIter<'a>(slice::Iter<'a, (String, Value)>);

impl<'a> Iterator for ObjectIter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for ObjectIter<'_> {}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Value);
    type IntoIter = ObjectIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Array
// ============================================================================

/// An ordered list of values.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Value>,
    listeners: Listeners,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, V>(values: I) -> Result<Array>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut array = Array::new();
        array.add_range(values)?;
        Ok(array)
    }

    /// Wrap items already known to hold no undefined values.
    pub(crate) fn from_items(items: Vec<Value>) -> Array {
        Array {
            items,
            listeners: Listeners::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.items.get_mut(index).and_then(Value::as_object_mut)
    }

    pub fn array_mut(&mut self, index: usize) -> Option<&mut Array> {
        self.items.get_mut(index).and_then(Value::as_array_mut)
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(JsonError::InvalidArgument(format!(
                "index {index} is out of range for an array of {} elements",
                self.items.len()
            )));
        }
        Ok(())
    }

    /// Replace the element at `index`, which must exist.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check_index(index, self.items.len())?;
        check_storable(&value)?;
        let dispatch = self.listeners.snapshot();
        let key = Some(ChangeKey::Position(index));
        dispatch.raise(
            ChangePhase::Changing,
            ChangeKind::Replace,
            key,
            Some(&value),
        );
        self.items[index] = value;
        dispatch.raise(
            ChangePhase::Changed,
            ChangeKind::Replace,
            key,
            Some(&self.items[index]),
        );
        Ok(())
    }

    /// Append `value`.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        check_storable(&value)?;
        self.place(self.items.len(), value);
        Ok(())
    }

    /// Insert `value` before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check_index(index, self.items.len() + 1)?;
        check_storable(&value)?;
        self.place(index, value);
        Ok(())
    }

    /// Append every value in order, after validating all of them.
    pub fn add_range<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        values.iter().try_for_each(check_storable)?;
        for value in values {
            self.place(self.items.len(), value);
        }
        Ok(())
    }

    fn place(&mut self, index: usize, value: Value) {
        let dispatch = self.listeners.snapshot();
        let key = Some(ChangeKey::Position(index));
        dispatch.raise(ChangePhase::Changing, ChangeKind::Add, key, Some(&value));
        self.items.insert(index, value);
        dispatch.raise(
            ChangePhase::Changed,
            ChangeKind::Add,
            key,
            Some(&self.items[index]),
        );
    }

    /// Remove and return the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        self.check_index(index, self.items.len())?;
        let dispatch = self.listeners.snapshot();
        let key = Some(ChangeKey::Position(index));
        dispatch.raise(
            ChangePhase::Changing,
            ChangeKind::Remove,
            key,
            Some(&self.items[index]),
        );
        let removed = self.items.remove(index);
        dispatch.raise(
            ChangePhase::Changed,
            ChangeKind::Remove,
            key,
            Some(&removed),
        );
        Ok(removed)
    }

    pub fn clear(&mut self) {
        let dispatch = self.listeners.snapshot();
        dispatch.raise(ChangePhase::Changing, ChangeKind::Clear, None, None);
        self.items.clear();
        dispatch.raise(ChangePhase::Changed, ChangeKind::Clear, None, None);
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&ChangeEvent<'_>) + Send + Sync + 'static,
    {
        self.listeners.subscribe(Arc::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
