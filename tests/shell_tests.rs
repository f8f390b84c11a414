#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use tabview::crud::CrudModal;
    use tabview::shell::{ManagementShell, NotificationLevel, RowSource, ShellMessages};
    use tabview::view::actions::{status_actions, ActionKind, ActionOutcome, RowAction};
    use tabview::view::selection::RowKey;
    use tabview::view::{ColumnDescriptor, TableOptions, TableView};

    #[derive(Debug, Clone, PartialEq)]
    struct Benefit {
        id: u32,
        name: String,
        status: String,
    }

    impl RowKey for Benefit {
        type Key = u32;

        fn row_key(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct BenefitDraft {
        name: String,
    }

    /// In-memory store with switchable failures
    #[derive(Default)]
    struct MemorySource {
        rows: Vec<Benefit>,
        next_id: u32,
        fail_fetch: bool,
        fail_writes: bool,
        fetches: usize,
    }

    impl MemorySource {
        fn with_rows(names: &[&str]) -> Self {
            let rows: Vec<Benefit> = names
                .iter()
                .enumerate()
                .map(|(i, name)| Benefit {
                    id: i as u32 + 1,
                    name: name.to_string(),
                    status: "pendente".to_string(),
                })
                .collect();
            Self {
                next_id: rows.len() as u32 + 1,
                rows,
                ..Default::default()
            }
        }
    }

    impl RowSource<Benefit> for MemorySource {
        type Draft = BenefitDraft;

        fn fetch(&mut self) -> Result<Vec<Benefit>> {
            self.fetches += 1;
            if self.fail_fetch {
                bail!("connection refused");
            }
            Ok(self.rows.clone())
        }

        fn create(&mut self, draft: BenefitDraft) -> Result<()> {
            if self.fail_writes {
                bail!("insert failed");
            }
            self.rows.push(Benefit {
                id: self.next_id,
                name: draft.name,
                status: "pendente".to_string(),
            });
            self.next_id += 1;
            Ok(())
        }

        fn update(&mut self, key: &u32, draft: BenefitDraft) -> Result<()> {
            if self.fail_writes {
                bail!("update failed");
            }
            match self.rows.iter_mut().find(|b| b.id == *key) {
                Some(row) => {
                    row.name = draft.name;
                    Ok(())
                }
                None => bail!("row {} not found", key),
            }
        }

        fn delete(&mut self, key: &u32) -> Result<()> {
            if self.fail_writes {
                bail!("delete failed");
            }
            self.rows.retain(|b| b.id != *key);
            Ok(())
        }

        fn custom(&mut self, name: &str, key: &u32) -> Result<()> {
            match self.rows.iter_mut().find(|b| b.id == *key) {
                Some(row) => {
                    row.status = name.to_string();
                    Ok(())
                }
                None => bail!("row {} not found", key),
            }
        }
    }

    fn shell(source: MemorySource) -> ManagementShell<Benefit, MemorySource> {
        let columns = vec![
            ColumnDescriptor::new("name", "Nome", |b: &Benefit| b.name.clone().into()),
            ColumnDescriptor::new("status", "Status", |b: &Benefit| b.status.clone().into()),
        ];
        let table = TableView::new(columns, TableOptions::default().with_title("Benefícios"));
        let mut shell = ManagementShell::new(
            source,
            table,
            ShellMessages::for_entity("Benefício", "o benefício", "benefícios"),
        );
        shell.refresh();
        shell
    }

    fn draft(name: &str) -> BenefitDraft {
        BenefitDraft {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_refresh_loads_rows() {
        let shell = shell(MemorySource::with_rows(&["Vale Refeição", "Plano de Saúde"]));
        assert_eq!(shell.table().total_count(), 2);
        assert!(!shell.table().is_loading());
        assert_eq!(shell.notifications().count(), 0);
    }

    #[test]
    fn test_failed_fetch_shows_empty_table_and_error() {
        let mut source = MemorySource::with_rows(&["Vale Refeição"]);
        source.fail_fetch = true;
        let mut shell = shell(source);

        assert_eq!(shell.table().total_count(), 0);
        let notes = shell.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].title, "Erro!");
        assert_eq!(notes[0].message, "Erro ao carregar benefícios");
        assert_eq!(shell.notifications().count(), 0);
    }

    #[test]
    fn test_create_success_closes_modal_and_reloads() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição"]));

        shell.open_create();
        assert_eq!(*shell.modal(), CrudModal::Creating);
        assert!(shell.submit(draft("Auxílio Creche")));

        assert!(!shell.modal().is_open());
        assert_eq!(shell.table().total_count(), 2);
        let notes = shell.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].title, "Sucesso!");
        assert_eq!(notes[0].message, "Benefício criado com sucesso.");
    }

    #[test]
    fn test_create_failure_keeps_form_open() {
        let mut source = MemorySource::with_rows(&["Vale Refeição"]);
        source.fail_writes = true;
        let mut shell = shell(source);

        shell.open_create();
        assert!(!shell.submit(draft("Auxílio Creche")));

        assert_eq!(*shell.modal(), CrudModal::Creating);
        assert_eq!(shell.table().total_count(), 1);
        let notes = shell.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Não foi possível criar o benefício.");
    }

    #[test]
    fn test_submit_without_open_form_does_nothing() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição"]));
        let fetches = shell.source().fetches;

        assert!(!shell.submit(draft("Nada")));

        assert_eq!(shell.source().fetches, fetches);
        assert_eq!(shell.notifications().count(), 0);
    }

    #[test]
    fn test_edit_action_opens_form_and_updates() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição", "Plano de Saúde"]));

        let outcome = shell.handle_action(&2, &RowAction::edit());
        assert_eq!(outcome, ActionOutcome::Dispatched(ActionKind::Edit));
        assert_eq!(shell.modal().row().map(|b| b.id), Some(2));
        assert!(matches!(shell.modal(), CrudModal::Editing(_)));

        assert!(shell.submit(draft("Plano Odontológico")));
        let names: Vec<String> = shell.table().rows().iter().map(|b| b.name.clone()).collect();
        assert_eq!(names, vec!["Vale Refeição", "Plano Odontológico"]);
        assert_eq!(
            shell.drain_notifications()[0].message,
            "Benefício atualizado com sucesso."
        );
    }

    #[test]
    fn test_view_then_switch_to_edit() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição"]));

        shell.handle_action(&1, &RowAction::view());
        assert!(matches!(shell.modal(), CrudModal::Viewing(_)));

        shell.switch_to_edit();
        assert!(matches!(shell.modal(), CrudModal::Editing(_)));

        shell.close_modal();
        assert!(!shell.modal().is_open());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição", "Plano de Saúde"]));

        let outcome = shell.handle_action(&1, &RowAction::delete());
        assert_eq!(outcome, ActionOutcome::AwaitingConfirmation);
        assert_eq!(shell.table().total_count(), 2);
        assert!(shell.table().render().pending_confirmation.is_some());

        let outcome = shell.confirm_action();
        assert_eq!(outcome, ActionOutcome::Dispatched(ActionKind::Delete));
        assert_eq!(shell.table().total_count(), 1);
        assert_eq!(
            shell.drain_notifications()[0].message,
            "Benefício excluído com sucesso."
        );
    }

    #[test]
    fn test_cancelled_delete_keeps_row() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição"]));

        shell.handle_action(&1, &RowAction::delete());
        assert_eq!(shell.cancel_action(), ActionOutcome::Cancelled);

        assert_eq!(shell.table().total_count(), 1);
        assert_eq!(shell.notifications().count(), 0);
    }

    #[test]
    fn test_failed_delete_reports_error() {
        let mut source = MemorySource::with_rows(&["Vale Refeição"]);
        source.fail_writes = true;
        let mut shell = shell(source);

        shell.handle_action(&1, &RowAction::delete());
        shell.confirm_action();

        assert_eq!(shell.table().total_count(), 1);
        let notes = shell.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Não foi possível excluir o benefício.");
    }

    #[test]
    fn test_status_action_updates_row() {
        let mut shell = shell(MemorySource::with_rows(&["Férias"]));

        let actions = status_actions("pendente");
        assert_eq!(actions.len(), 2);
        let approve = &actions[0];
        assert_eq!(approve.label(), "Aprovar");

        shell.handle_action(&1, approve);

        assert_eq!(shell.table().rows()[0].status, "aprovado");
        assert_eq!(
            shell.drain_notifications()[0].level,
            NotificationLevel::Success
        );
    }

    #[test]
    fn test_search_survives_refresh() {
        let mut shell = shell(MemorySource::with_rows(&["Vale Refeição", "Plano de Saúde"]));
        shell.table_mut().set_global_filter("plano");
        assert_eq!(shell.table().filtered_count(), 1);

        shell.open_create();
        shell.submit(draft("Plano Odontológico"));

        assert_eq!(shell.table().filtered_count(), 2);
    }
}
