//! The canonical task collection
//!
//! `TaskStore` owns the ordered task list (most recent first) and writes it
//! back to its blob store synchronously after every mutation. Reads never
//! fail: a missing or corrupt blob starts an empty collection.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use crate::models::Task;
use crate::recur::{toggle_completion, CompletionOutcome};
use crate::store::blob::{BlobStore, TASKS_KEY, UNDO_KEY};
use crate::store::error::StoreError;
use crate::store::normalize::{load_records, normalize_records};
use crate::store::patch::TaskPatch;
use crate::store::undo::UndoSlot;

/// Minimum id-prefix length accepted by `resolve`
pub const MIN_ID_PREFIX: usize = 4;

pub struct TaskStore<B: BlobStore> {
    blob: B,
    tasks: Vec<Task>,
    undo: UndoSlot,
    undo_window: Duration,
}

impl<B: BlobStore> TaskStore<B> {
    /// Load the collection and pending undo from `blob`
    pub fn open(blob: B, undo_window: Duration) -> Self {
        let tasks = Self::load_tasks(&blob);
        let undo = Self::load_undo(&blob);
        log::debug!("loaded {} task(s)", tasks.len());
        Self { blob, tasks, undo, undo_window }
    }

    fn load_tasks(blob: &B) -> Vec<Task> {
        let raw = match blob.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("failed to read task collection, starting empty: {:#}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => load_records(value),
            Err(e) => {
                log::warn!("task collection is not valid JSON, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn load_undo(blob: &B) -> UndoSlot {
        match blob.get(UNDO_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("discarding unreadable undo slot: {}", e);
                UndoSlot::Empty
            }),
            Ok(None) => UndoSlot::Empty,
            Err(e) => {
                log::warn!("failed to read undo slot: {:#}", e);
                UndoSlot::Empty
            }
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.tasks)?;
        self.blob.put(TASKS_KEY, &json)?;
        Ok(())
    }

    fn persist_undo(&mut self) -> Result<(), StoreError> {
        match &self.undo {
            UndoSlot::Empty => self.blob.delete(UNDO_KEY)?,
            pending => {
                let json = serde_json::to_string(pending)?;
                self.blob.put(UNDO_KEY, &json)?;
            }
        }
        Ok(())
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Zero-based position of a task in the collection
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Resolve a user reference to a task id
    ///
    /// Accepts a 1-based list position or a unique id prefix of at least
    /// `MIN_ID_PREFIX` characters.
    pub fn resolve(&self, reference: &str) -> Result<String, StoreError> {
        let reference = reference.trim();

        if let Ok(n) = reference.parse::<usize>() {
            if n >= 1 && n <= self.tasks.len() {
                return Ok(self.tasks[n - 1].id.clone());
            }
        }

        if reference.len() >= MIN_ID_PREFIX {
            let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(reference));
            match (matches.next(), matches.next()) {
                (Some(task), None) => return Ok(task.id.clone()),
                (Some(_), Some(_)) => return Err(StoreError::AmbiguousReference(reference.to_string())),
                _ => {}
            }
        }

        Err(StoreError::TaskNotFound(reference.to_string()))
    }

    /// Prepend a task (most-recent-first ordering)
    pub fn add(&mut self, task: Task) -> Result<(), StoreError> {
        log::info!("adding task {} '{}'", task.id, task.title);
        self.tasks.insert(0, task);
        self.persist()
    }

    /// Apply a closure to one task and persist
    pub fn edit<F>(&mut self, id: &str, f: F) -> Result<&Task, StoreError>
    where
        F: FnOnce(&mut Task),
    {
        let index = self.position(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        f(&mut self.tasks[index]);
        self.persist()?;
        Ok(&self.tasks[index])
    }

    /// Partial field update
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<&Task, StoreError> {
        patch.validate()?;
        self.edit(id, |task| patch.apply(task))
    }

    /// Toggle completion through the recurrence engine, rewriting the task in place
    pub fn toggle(&mut self, id: &str, now: NaiveDateTime) -> Result<CompletionOutcome, StoreError> {
        let index = self.position(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        let completion = toggle_completion(&self.tasks[index], now);
        self.tasks[index] = completion.task;
        self.persist()?;
        Ok(completion.outcome)
    }

    /// Move a task to a new due date (week view drop)
    pub fn reschedule(&mut self, id: &str, due: Option<NaiveDate>) -> Result<&Task, StoreError> {
        self.edit(id, |task| task.due_date = due)
    }

    /// Remove a task, parking it in the undo slot until the window closes
    ///
    /// Any earlier pending delete is evicted.
    pub fn remove(&mut self, id: &str, now: NaiveDateTime) -> Result<Task, StoreError> {
        let index = self.position(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(index);

        if let UndoSlot::Pending { task: evicted, .. } = &self.undo {
            log::debug!("evicting pending undo for task {}", evicted.id);
        }
        self.undo = UndoSlot::pending(task.clone(), now, self.undo_window);

        // Undo slot first: a task must never leave storage without it
        self.persist_undo()?;
        self.persist()?;
        Ok(task)
    }

    /// Restore the most recent delete if it has not expired
    ///
    /// The restored task goes to the front, like a new capture. After the
    /// window closes this is a no-op returning `None`, as it is when a task
    /// with the same id is already back in the collection.
    pub fn undo(&mut self, now: NaiveDateTime) -> Result<Option<Task>, StoreError> {
        let was_set = self.undo != UndoSlot::Empty;
        let restored = self.undo.take(now).filter(|task| {
            let present = self.position(&task.id).is_some();
            if present {
                log::warn!("not restoring task {}: id already present", task.id);
            }
            !present
        });

        if let Some(task) = &restored {
            self.tasks.insert(0, task.clone());
            self.persist()?;
        }
        if was_set {
            self.persist_undo()?;
        }
        Ok(restored)
    }

    pub fn pending_undo(&self) -> &UndoSlot {
        &self.undo
    }

    /// Clear an expired undo slot
    pub fn expire_undo(&mut self, now: NaiveDateTime) -> Result<bool, StoreError> {
        if self.undo.expire(now) {
            self.persist_undo()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Replace the whole collection
    ///
    /// Drops any pending undo, since the parked task belongs to the old set.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<(), StoreError> {
        log::info!("replacing collection with {} task(s)", tasks.len());
        self.tasks = tasks;
        self.persist()?;
        if self.undo != UndoSlot::Empty {
            self.undo = UndoSlot::Empty;
            self.persist_undo()?;
        }
        Ok(())
    }

    /// Import an exported collection
    ///
    /// Returns false, leaving the store untouched, unless `text` is a JSON
    /// array whose every record normalizes.
    pub fn import_json(&mut self, text: &str) -> Result<bool, StoreError> {
        let tasks = serde_json::from_str::<serde_json::Value>(text)
            .ok()
            .and_then(normalize_records);

        match tasks {
            Some(tasks) => {
                self.replace_all(tasks)?;
                Ok(true)
            }
            None => {
                log::debug!("ignoring malformed import");
                Ok(false)
            }
        }
    }

    /// Serialize the whole collection for export
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.tasks)?)
    }
}

/// File name for an export made on `today`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("tasks-{}.json", today.format("%Y-%m-%d"))
}
