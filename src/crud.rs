//! Modal controller shared by every management screen.
//!
//! One state machine replaces the per-screen trio of "form open", "editing
//! row" and "viewing row" flags. `Closed` starts and ends every cycle.

use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum CrudModal<T> {
    Closed,
    Creating,
    Editing(T),
    Viewing(T),
}

/// What the form submission asks the row source to do
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<K, D> {
    Create(D),
    Update { key: K, data: D },
}

impl<T> Default for CrudModal<T> {
    fn default() -> Self {
        CrudModal::Closed
    }
}

impl<T> CrudModal<T> {
    pub fn new() -> Self {
        CrudModal::Closed
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, CrudModal::Closed)
    }

    /// Row being edited or viewed
    pub fn row(&self) -> Option<&T> {
        match self {
            CrudModal::Editing(row) | CrudModal::Viewing(row) => Some(row),
            CrudModal::Closed | CrudModal::Creating => None,
        }
    }

    pub fn open_create(&mut self) {
        *self = CrudModal::Creating;
    }

    pub fn open_edit(&mut self, row: T) {
        *self = CrudModal::Editing(row);
    }

    pub fn open_view(&mut self, row: T) {
        *self = CrudModal::Viewing(row);
    }

    /// "Edit" button inside the details dialog
    pub fn switch_to_edit(&mut self) {
        if let CrudModal::Viewing(_) = self {
            if let CrudModal::Viewing(row) = std::mem::replace(self, CrudModal::Closed) {
                *self = CrudModal::Editing(row);
            }
        }
    }

    pub fn close(&mut self) {
        *self = CrudModal::Closed;
    }

    /// Turn the form data into a mutation and close the modal.
    ///
    /// Only the create and edit forms can be submitted; anything else
    /// yields `None` and leaves the state alone.
    pub fn submit<K, D, F>(&mut self, data: D, key_of: F) -> Option<Mutation<K, D>>
    where
        F: FnOnce(&T) -> K,
    {
        let mutation = match self {
            CrudModal::Creating => Mutation::Create(data),
            CrudModal::Editing(row) => Mutation::Update {
                key: key_of(row),
                data,
            },
            CrudModal::Closed | CrudModal::Viewing(_) => {
                debug!(target: "crud", "Submit ignored, no form open");
                return None;
            }
        };
        self.close();
        Some(mutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Benefit {
        id: u32,
        name: &'static str,
    }

    fn vale() -> Benefit {
        Benefit {
            id: 3,
            name: "Vale Refeição",
        }
    }

    #[test]
    fn test_starts_closed() {
        let modal: CrudModal<Benefit> = CrudModal::new();
        assert!(!modal.is_open());
        assert!(modal.row().is_none());
    }

    #[test]
    fn test_opening_replaces_current_state() {
        let mut modal = CrudModal::new();
        modal.open_view(vale());
        modal.open_create();
        assert_eq!(modal, CrudModal::Creating);
    }

    #[test]
    fn test_view_then_edit() {
        let mut modal = CrudModal::new();
        modal.open_view(vale());
        modal.switch_to_edit();
        assert_eq!(modal, CrudModal::Editing(vale()));

        modal.close();
        modal.switch_to_edit();
        assert_eq!(modal, CrudModal::Closed);
    }

    #[test]
    fn test_submit_create_closes() {
        let mut modal: CrudModal<Benefit> = CrudModal::new();
        modal.open_create();
        let mutation = modal.submit("Plano de Saúde", |b| b.id);
        assert_eq!(mutation, Some(Mutation::Create("Plano de Saúde")));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_submit_edit_carries_key() {
        let mut modal = CrudModal::new();
        modal.open_edit(vale());
        let mutation = modal.submit(vale().name, |b| b.id);
        assert_eq!(
            mutation,
            Some(Mutation::Update {
                key: 3,
                data: "Vale Refeição"
            })
        );
        assert_eq!(modal, CrudModal::Closed);
    }

    #[test]
    fn test_submit_from_view_is_ignored() {
        let mut modal = CrudModal::new();
        modal.open_view(vale());
        assert_eq!(modal.submit("x", |b: &Benefit| b.id), None);
        assert_eq!(modal, CrudModal::Viewing(vale()));
    }
}
