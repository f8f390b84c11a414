//! Glue between a row source, the table view and the CRUD modal.
//!
//! A management screen owns one shell. Rows come from the source on
//! `refresh`; row actions and form submissions go back to it, and every
//! outcome is reported through the notification queue.

use crate::crud::{CrudModal, Mutation};
use crate::view::actions::{ActionOutcome, RowAction, RowActionHandler};
use crate::view::selection::RowKey;
use crate::view::table_view::TableView;
use anyhow::{bail, Result};
use std::collections::VecDeque;
use tracing::{debug, error, info};

/// Backing store for one kind of row
pub trait RowSource<T: RowKey> {
    /// Form data for create and update
    type Draft;

    fn fetch(&mut self) -> Result<Vec<T>>;

    fn create(&mut self, draft: Self::Draft) -> Result<()>;

    fn update(&mut self, key: &T::Key, draft: Self::Draft) -> Result<()>;

    fn delete(&mut self, key: &T::Key) -> Result<()>;

    /// Named row actions such as status changes
    fn custom(&mut self, name: &str, key: &T::Key) -> Result<()> {
        let _ = key;
        bail!("Unsupported action '{}'", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Sucesso!".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Erro!".to_string(),
            message: message.into(),
        }
    }
}

/// Texts reported after each operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellMessages {
    pub created: String,
    pub updated: String,
    pub deleted: String,
    pub create_failed: String,
    pub update_failed: String,
    pub delete_failed: String,
    pub load_failed: String,
    pub action_failed: String,
}

impl ShellMessages {
    /// Masculine-noun phrasing, e.g. `for_entity("Benefício", "o benefício", "benefícios")`
    pub fn for_entity(name: &str, with_article: &str, plural: &str) -> Self {
        Self {
            created: format!("{} criado com sucesso.", name),
            updated: format!("{} atualizado com sucesso.", name),
            deleted: format!("{} excluído com sucesso.", name),
            create_failed: format!("Não foi possível criar {}.", with_article),
            update_failed: format!("Não foi possível atualizar {}.", with_article),
            delete_failed: format!("Não foi possível excluir {}.", with_article),
            load_failed: format!("Erro ao carregar {}", plural),
            action_failed: "Não foi possível concluir a ação.".to_string(),
        }
    }
}

impl Default for ShellMessages {
    fn default() -> Self {
        Self::for_entity("Registro", "o registro", "registros")
    }
}

enum Intent<K> {
    View(K),
    Edit(K),
    Delete(K),
    Custom(String, K),
}

/// Collects action callbacks so they can be applied once the table borrow ends
struct IntentRecorder<K> {
    intents: Vec<Intent<K>>,
}

impl<T: RowKey> RowActionHandler<T> for IntentRecorder<T::Key> {
    fn on_view(&mut self, row: &T) {
        self.intents.push(Intent::View(row.row_key()));
    }

    fn on_edit(&mut self, row: &T) {
        self.intents.push(Intent::Edit(row.row_key()));
    }

    fn on_delete(&mut self, row: &T) {
        self.intents.push(Intent::Delete(row.row_key()));
    }

    fn on_custom(&mut self, name: &str, row: &T) {
        self.intents
            .push(Intent::Custom(name.to_string(), row.row_key()));
    }
}

pub struct ManagementShell<T, S>
where
    T: RowKey + Clone,
    S: RowSource<T>,
{
    source: S,
    table: TableView<T>,
    modal: CrudModal<T>,
    notifications: VecDeque<Notification>,
    messages: ShellMessages,
}

impl<T, S> ManagementShell<T, S>
where
    T: RowKey + Clone,
    S: RowSource<T>,
{
    pub fn new(source: S, table: TableView<T>, messages: ShellMessages) -> Self {
        Self {
            source,
            table,
            modal: CrudModal::new(),
            notifications: VecDeque::new(),
            messages,
        }
    }

    pub fn table(&self) -> &TableView<T> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableView<T> {
        &mut self.table
    }

    pub fn modal(&self) -> &CrudModal<T> {
        &self.modal
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reload rows. A failed fetch shows an empty table plus an error.
    pub fn refresh(&mut self) {
        self.table.set_loading(true);
        let rows = match self.source.fetch() {
            Ok(rows) => rows,
            Err(e) => {
                error!(target: "shell", "Failed to fetch rows: {:#}", e);
                self.notify(Notification::error(self.messages.load_failed.clone()));
                Vec::new()
            }
        };
        debug!(target: "shell", "Fetched {} rows", rows.len());
        self.table.set_rows(rows);
        self.table.set_loading(false);
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// "Edit" inside the details dialog
    pub fn switch_to_edit(&mut self) {
        self.modal.switch_to_edit();
    }

    /// Save the open form: update when editing, create otherwise.
    ///
    /// On success the modal closes and rows are reloaded. On failure the form
    /// stays open and the table is left as it was.
    pub fn submit(&mut self, draft: S::Draft) -> bool {
        let before = self.modal.clone();
        let Some(mutation) = self.modal.submit(draft, |row| row.row_key()) else {
            return false;
        };

        let (result, ok_msg, err_msg) = match mutation {
            Mutation::Create(data) => (
                self.source.create(data),
                &self.messages.created,
                &self.messages.create_failed,
            ),
            Mutation::Update { key, data } => (
                self.source.update(&key, data),
                &self.messages.updated,
                &self.messages.update_failed,
            ),
        };

        match result {
            Ok(()) => {
                info!(target: "shell", "{}", ok_msg);
                let note = Notification::success(ok_msg.clone());
                self.notify(note);
                self.refresh();
                true
            }
            Err(e) => {
                error!(target: "shell", "Save failed: {:#}", e);
                let note = Notification::error(err_msg.clone());
                self.notify(note);
                self.modal = before;
                false
            }
        }
    }

    /// Route a row action through the table; confirm actions wait for
    /// [`confirm_action`](Self::confirm_action)
    pub fn handle_action(&mut self, key: &T::Key, action: &RowAction) -> ActionOutcome {
        let mut recorder = IntentRecorder {
            intents: Vec::new(),
        };
        let outcome = self.table.trigger_action(key, action, &mut recorder);
        self.apply(recorder.intents);
        outcome
    }

    pub fn confirm_action(&mut self) -> ActionOutcome {
        let mut recorder = IntentRecorder {
            intents: Vec::new(),
        };
        let outcome = self.table.confirm_pending_action(&mut recorder);
        self.apply(recorder.intents);
        outcome
    }

    pub fn cancel_action(&mut self) -> ActionOutcome {
        self.table.cancel_pending_action()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Take every queued notification, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn apply(&mut self, intents: Vec<Intent<T::Key>>) {
        for intent in intents {
            match intent {
                Intent::View(key) => {
                    if let Some(row) = self.table.row_by_key(&key).cloned() {
                        self.modal.open_view(row);
                    }
                }
                Intent::Edit(key) => {
                    if let Some(row) = self.table.row_by_key(&key).cloned() {
                        self.modal.open_edit(row);
                    }
                }
                Intent::Delete(key) => {
                    let result = self.source.delete(&key);
                    self.report(result, |m| (&m.deleted, &m.delete_failed));
                }
                Intent::Custom(name, key) => {
                    let result = self.source.custom(&name, &key);
                    self.report(result, |m| (&m.updated, &m.action_failed));
                }
            }
        }
    }

    fn report<F>(&mut self, result: Result<()>, pick: F)
    where
        F: Fn(&ShellMessages) -> (&String, &String),
    {
        let (ok_msg, err_msg) = pick(&self.messages);
        match result {
            Ok(()) => {
                let note = Notification::success(ok_msg.clone());
                self.notify(note);
                self.refresh();
            }
            Err(e) => {
                error!(target: "shell", "Action failed: {:#}", e);
                let note = Notification::error(err_msg.clone());
                self.notify(note);
            }
        }
    }
}
