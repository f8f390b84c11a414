//! Per-row action menus.
//!
//! Each management module builds a list of actions for a row. A simple action
//! fires its callback straight away; a confirm action parks itself until the
//! user accepts or dismisses the confirmation prompt.

use tracing::debug;

pub const DEFAULT_CONFIRM_TEXT: &str = "Confirmar";
pub const DEFAULT_CANCEL_TEXT: &str = "Cancelar";

/// How many actions render inline before the rest move into an overflow menu
pub const DEFAULT_MAX_INLINE_ACTIONS: usize = 2;

/// Which callback an action triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    /// Module-specific action such as a status change, by name
    Custom(String),
}

/// Text shown in the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub description: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
        }
    }

    pub fn with_confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    /// Standard prompt for destructive deletes
    pub fn delete() -> Self {
        Self::new(
            "Confirmar exclusão",
            "Tem certeza que deseja excluir este item? Esta ação não pode ser desfeita.",
        )
        .with_confirm_text("Excluir")
    }
}

/// Entry in a row's action menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Simple {
        label: String,
        kind: ActionKind,
        disabled: bool,
    },
    Confirm {
        label: String,
        kind: ActionKind,
        disabled: bool,
        confirm: Confirmation,
    },
}

impl RowAction {
    pub fn simple(label: impl Into<String>, kind: ActionKind) -> Self {
        RowAction::Simple {
            label: label.into(),
            kind,
            disabled: false,
        }
    }

    pub fn confirmed(label: impl Into<String>, kind: ActionKind, confirm: Confirmation) -> Self {
        RowAction::Confirm {
            label: label.into(),
            kind,
            disabled: false,
            confirm,
        }
    }

    pub fn view() -> Self {
        Self::simple("Visualizar", ActionKind::View)
    }

    pub fn edit() -> Self {
        Self::simple("Editar", ActionKind::Edit)
    }

    pub fn delete() -> Self {
        Self::confirmed("Excluir", ActionKind::Delete, Confirmation::delete())
    }

    pub fn custom(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::simple(label, ActionKind::Custom(name.into()))
    }

    /// Gate this action behind a confirmation prompt
    pub fn with_confirmation(self, confirm: Confirmation) -> Self {
        let (label, kind, disabled) = self.into_parts();
        RowAction::Confirm {
            label,
            kind,
            disabled,
            confirm,
        }
    }

    pub fn disabled(mut self, value: bool) -> Self {
        match &mut self {
            RowAction::Simple { disabled, .. } | RowAction::Confirm { disabled, .. } => {
                *disabled = value
            }
        }
        self
    }

    pub fn label(&self) -> &str {
        match self {
            RowAction::Simple { label, .. } | RowAction::Confirm { label, .. } => label,
        }
    }

    pub fn kind(&self) -> &ActionKind {
        match self {
            RowAction::Simple { kind, .. } | RowAction::Confirm { kind, .. } => kind,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            RowAction::Simple { disabled, .. } | RowAction::Confirm { disabled, .. } => *disabled,
        }
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match self {
            RowAction::Simple { .. } => None,
            RowAction::Confirm { confirm, .. } => Some(confirm),
        }
    }

    fn into_parts(self) -> (String, ActionKind, bool) {
        match self {
            RowAction::Simple {
                label,
                kind,
                disabled,
            }
            | RowAction::Confirm {
                label,
                kind,
                disabled,
                ..
            } => (label, kind, disabled),
        }
    }
}

/// Standard view / edit / delete menu
pub fn crud_actions() -> Vec<RowAction> {
    vec![RowAction::view(), RowAction::edit(), RowAction::delete()]
}

/// Approval workflow actions, omitting the transition to the current status
pub fn status_actions(status: &str) -> Vec<RowAction> {
    [
        ("aprovado", "Aprovar"),
        ("rejeitado", "Rejeitar"),
        ("pendente", "Marcar como Pendente"),
    ]
    .iter()
    .filter(|(target, _)| *target != status)
    .map(|(target, label)| RowAction::custom(*label, *target))
    .collect()
}

/// Actions split between inline buttons and the overflow menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    pub inline: Vec<RowAction>,
    pub overflow: Vec<RowAction>,
}

impl ActionMenu {
    pub fn split(mut actions: Vec<RowAction>, max_inline: usize) -> Self {
        let overflow = if actions.len() > max_inline {
            actions.split_off(max_inline)
        } else {
            Vec::new()
        };
        Self {
            inline: actions,
            overflow,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowAction> {
        self.inline.iter().chain(self.overflow.iter())
    }
}

/// Callbacks supplied by the management shell
pub trait RowActionHandler<T> {
    fn on_view(&mut self, row: &T);

    fn on_edit(&mut self, row: &T);

    fn on_delete(&mut self, row: &T);

    fn on_custom(&mut self, name: &str, row: &T) {
        let _ = (name, row);
    }
}

/// Route an action to the matching handler callback
pub fn dispatch<T, H>(kind: &ActionKind, row: &T, handler: &mut H)
where
    H: RowActionHandler<T> + ?Sized,
{
    debug!(target: "actions", "Dispatching {:?}", kind);
    match kind {
        ActionKind::View => handler.on_view(row),
        ActionKind::Edit => handler.on_edit(row),
        ActionKind::Delete => handler.on_delete(row),
        ActionKind::Custom(name) => handler.on_custom(name, row),
    }
}

/// A confirm action waiting for the user's answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction<K> {
    pub row_key: K,
    pub kind: ActionKind,
    pub confirm: Confirmation,
}

/// Result of triggering, confirming or cancelling an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Dispatched(ActionKind),
    AwaitingConfirmation,
    Cancelled,
    /// Disabled action, unknown row, or nothing pending
    Ignored,
}
