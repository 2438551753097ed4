//! Application state and its update functions.

use rolodex_core::{Contact, ContactId};

use crate::cache::ContactCache;
use crate::commands::{Command, Outcome};
use crate::config::TuiConfig;
use crate::form::ContactForm;
use crate::keys::{Action, InputMode};
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::table::{page_count, project, Pagination, SortColumn, SortState};
use crate::theme::Theme;

/// What the runtime should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Run(Command),
}

impl From<Option<Command>> for Effect {
    fn from(command: Option<Command>) -> Self {
        command.map_or(Effect::None, Effect::Run)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Table,
}

/// The list area shows the table or the inline editor, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPanel {
    Table,
    Edit(ContactForm),
}

/// Pending delete waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: ContactId,
    pub display_name: String,
}

impl DeleteConfirmation {
    pub const TITLE: &'static str = "Confirm Delete";
    pub const PROMPT: &'static str = "Are you sure you want to delete this contact?";
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub sort: SortState,
    pub pagination: Pagination,
    /// Row index within the current page.
    pub selected: usize,
    pub panel: ListPanel,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            pagination: Pagination::default(),
            selected: 0,
            panel: ListPanel::Table,
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub cache: ContactCache,
    pub create_form: ContactForm,
    pub list: ListView,
    pub confirm: Option<DeleteConfirmation>,
    pub focus: Focus,
    pub notifications: Vec<Notification>,
    pub loading: bool,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let theme = Theme::from_name(&config.theme.name).unwrap_or_else(Theme::synthbrute);
        Self {
            config,
            theme,
            cache: ContactCache::new(),
            create_form: ContactForm::create(),
            list: ListView::default(),
            confirm: None,
            focus: Focus::Table,
            notifications: Vec::new(),
            loading: false,
        }
    }

    /// First command to run once the terminal is up.
    pub fn startup(&mut self) -> Command {
        self.loading = true;
        Command::FetchAll
    }

    pub fn restore(&mut self, state: &PersistedState) {
        self.list.sort = state.sort;
        if self.list.pagination.set_page_size(state.page_size).is_err() {
            self.list.pagination = Pagination::default();
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            sort: self.list.sort,
            page_size: self.list.pagination.page_size(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.confirm.is_some() {
            InputMode::Confirming
        } else if self.is_editing() || self.focus == Focus::Form {
            InputMode::Editing
        } else {
            InputMode::Navigate
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.list.panel, ListPanel::Edit(_))
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Drop notifications older than the configured lifetime.
    pub fn prune_notifications(&mut self, now: chrono::DateTime<chrono::Utc>) {
        let ttl = chrono::Duration::milliseconds(
            i64::try_from(self.config.notification_ttl_ms).unwrap_or(i64::MAX / 1_000_000),
        );
        self.notifications.retain(|n| !n.is_expired(now, ttl));
    }

    // ========================================================================
    // TABLE
    // ========================================================================

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&Contact> {
        project(self.cache.contacts(), &self.list.sort, &self.list.pagination)
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.visible_rows().get(self.list.selected).copied()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.cache.len(), self.list.pagination.page_size())
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.list.sort.toggle(column);
        self.list.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.list.pagination.next_page(self.cache.len());
        self.list.selected = 0;
    }

    pub fn prev_page(&mut self) {
        self.list.pagination.prev_page();
        self.list.selected = 0;
    }

    pub fn cycle_page_size(&mut self) {
        self.list.pagination.cycle_page_size();
        self.list.selected = 0;
    }

    pub fn select_next(&mut self) {
        let rows = self.visible_rows().len();
        if self.list.selected + 1 < rows {
            self.list.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.list.selected = self.list.selected.saturating_sub(1);
    }

    fn clamp_view(&mut self) {
        self.list.pagination.clamp(self.cache.len());
        let rows = self.visible_rows().len();
        if self.list.selected >= rows {
            self.list.selected = rows.saturating_sub(1);
        }
    }

    // ========================================================================
    // FORMS
    // ========================================================================

    pub fn submit_create(&mut self) -> Option<Command> {
        if self.create_form.submitting {
            return None;
        }
        self.create_form.validate().ok().map(Command::Create)
    }

    /// Replace the table with an editor for the selected row.
    pub fn begin_edit(&mut self) -> bool {
        let Some(contact) = self.selected_contact().cloned() else {
            return false;
        };
        self.list.panel = ListPanel::Edit(ContactForm::edit(&contact));
        self.focus = Focus::Table;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.list.panel = ListPanel::Table;
    }

    pub fn submit_edit(&mut self) -> Option<Command> {
        let ListPanel::Edit(form) = &mut self.list.panel else {
            return None;
        };
        if form.submitting {
            return None;
        }
        let id = form.editing_id()?;
        form.validate().ok().map(|fields| Command::Update { id, fields })
    }

    fn active_form_mut(&mut self) -> &mut ContactForm {
        match &mut self.list.panel {
            ListPanel::Edit(form) => form,
            ListPanel::Table => &mut self.create_form,
        }
    }

    // ========================================================================
    // DELETE
    // ========================================================================

    /// First phase: remember the intent. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: ContactId) -> bool {
        match self.cache.get(id) {
            Some(contact) => {
                self.confirm = Some(DeleteConfirmation {
                    id,
                    display_name: contact.display_name(),
                });
                true
            }
            None => false,
        }
    }

    /// Second phase: issue the delete for the pending request.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        self.confirm.take().map(|c| Command::Delete { id: c.id })
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = None;
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    pub fn refresh(&mut self) -> Command {
        self.loading = true;
        Command::FetchAll
    }

    pub fn handle(&mut self, action: Action) -> Effect {
        match (self.input_mode(), action) {
            (_, Action::Quit) => Effect::Quit,
            (_, Action::Refresh) => Effect::Run(self.refresh()),

            (InputMode::Confirming, Action::Confirm) => self.confirm_delete().into(),
            (InputMode::Confirming, Action::Cancel) => {
                self.cancel_delete();
                Effect::None
            }

            (InputMode::Editing, Action::Input(c)) => {
                self.active_form_mut().insert_char(c);
                Effect::None
            }
            (InputMode::Editing, Action::Backspace) => {
                self.active_form_mut().backspace();
                Effect::None
            }
            (InputMode::Editing, Action::NextField) => {
                self.active_form_mut().focus_next();
                Effect::None
            }
            (InputMode::Editing, Action::PrevField) => {
                self.active_form_mut().focus_prev();
                Effect::None
            }
            (InputMode::Editing, Action::Confirm) => {
                if self.is_editing() {
                    self.submit_edit().into()
                } else {
                    self.submit_create().into()
                }
            }
            (InputMode::Editing, Action::Cancel) => {
                if self.is_editing() {
                    self.cancel_edit();
                } else {
                    self.focus = Focus::Table;
                }
                Effect::None
            }

            (InputMode::Navigate, nav) => {
                match nav {
                    Action::MoveUp => self.select_previous(),
                    Action::MoveDown => self.select_next(),
                    Action::PrevPage => self.prev_page(),
                    Action::NextPage => self.next_page(),
                    Action::CyclePageSize => self.cycle_page_size(),
                    Action::SortBy(column) => self.toggle_sort(column),
                    Action::FocusForm => self.focus = Focus::Form,
                    Action::FocusTable => self.focus = Focus::Table,
                    Action::EditItem => {
                        self.begin_edit();
                    }
                    Action::DeleteItem => {
                        if let Some(id) = self.selected_contact().map(|c| c.id) {
                            self.request_delete(id);
                        }
                    }
                    _ => {}
                }
                Effect::None
            }

            _ => Effect::None,
        }
    }

    /// Fold a finished request into the state.
    pub fn apply(&mut self, outcome: Outcome) -> Effect {
        let refetch = self.config.refresh_after_mutation;
        match outcome {
            Outcome::Fetched(result) => {
                self.loading = false;
                if let Err(err) = self.cache.refresh(result) {
                    self.notify(
                        NotificationLevel::Error,
                        format!("Failed to load contacts: {}", err),
                    );
                }
                self.clamp_view();
                Effect::None
            }
            Outcome::Created(Ok(contact)) => {
                self.create_form.reset();
                self.notify(
                    NotificationLevel::Success,
                    format!("Added {}", contact.display_name()),
                );
                if refetch {
                    return Effect::Run(self.refresh());
                }
                self.cache.append(contact);
                Effect::None
            }
            Outcome::Created(Err(err)) => {
                self.create_form.submission_failed(&err);
                Effect::None
            }
            Outcome::Updated { id, result } => match result {
                Ok(contact) => {
                    if self.editing_id() == Some(id) {
                        self.cancel_edit();
                    }
                    self.notify(
                        NotificationLevel::Success,
                        format!("Updated {}", contact.display_name()),
                    );
                    if refetch {
                        return Effect::Run(self.refresh());
                    }
                    self.cache.replace(contact);
                    Effect::None
                }
                Err(err) => {
                    if self.editing_id() == Some(id) {
                        self.active_form_mut().submission_failed(&err);
                    } else {
                        self.notify(
                            NotificationLevel::Error,
                            format!("Failed to update contact: {}", err),
                        );
                    }
                    Effect::None
                }
            },
            Outcome::Deleted { id, result } => match result {
                Ok(()) => {
                    if self.editing_id() == Some(id) {
                        self.cancel_edit();
                    }
                    self.notify(NotificationLevel::Success, "Contact deleted successfully");
                    if refetch {
                        return Effect::Run(self.refresh());
                    }
                    self.cache.remove(id);
                    self.clamp_view();
                    Effect::None
                }
                Err(err) => {
                    self.notify(
                        NotificationLevel::Error,
                        format!("Failed to delete contact: {}", err),
                    );
                    Effect::None
                }
            },
        }
    }

    fn editing_id(&self) -> Option<ContactId> {
        match &self.list.panel {
            ListPanel::Edit(form) => form.editing_id(),
            ListPanel::Table => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::ApiClientError;
    use crate::config::ThemeConfig;
    use crate::form::{DUPLICATE_EMAIL_MESSAGE, REQUIRED_FIELDS_MESSAGE};
    use crate::table::SortDirection;
    use rolodex_api::ErrorCode;
    use rolodex_core::{ContactField, ContactFields};

    fn config() -> TuiConfig {
        TuiConfig {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 5_000,
            notification_ttl_ms: 4_000,
            persistence_path: "tmp/rolodex-tui.json".into(),
            theme: ThemeConfig {
                name: "synthbrute".to_string(),
            },
            refresh_after_mutation: false,
        }
    }

    fn contact(first: &str, email: &str) -> Contact {
        Contact::new(
            ContactId::now_v7(),
            ContactFields::new(first, "B", email, "123"),
        )
    }

    fn loaded(contacts: Vec<Contact>) -> App {
        let mut app = App::new(config());
        app.apply(Outcome::Fetched(Ok(contacts)));
        app
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(Action::Input(c));
        }
    }

    fn duplicate() -> ApiClientError {
        ApiClientError::Api {
            status: 400,
            code: Some(ErrorCode::DuplicateEmail),
            message: "duplicate email".to_string(),
        }
    }

    #[test]
    fn test_startup_fetches() {
        let mut app = App::new(config());
        assert_eq!(app.startup(), Command::FetchAll);
        assert!(app.loading);
    }

    #[test]
    fn test_fetch_failure_keeps_cache() {
        let mut app = loaded(vec![contact("A", "a@b.com")]);
        app.apply(Outcome::Fetched(Err(duplicate())));
        assert_eq!(app.cache.len(), 1);
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].level, NotificationLevel::Error);
    }

    #[test]
    fn test_create_flow() {
        let mut app = loaded(Vec::new());
        app.handle(Action::FocusForm);
        assert_eq!(app.input_mode(), InputMode::Editing);

        for value in ["A", "B", "a@b.com", "123"] {
            type_into(&mut app, value);
            app.handle(Action::NextField);
        }
        let effect = app.handle(Action::Confirm);
        let expected = ContactFields::new("A", "B", "a@b.com", "123");
        assert_eq!(effect, Effect::Run(Command::Create(expected.clone())));

        // A second Enter while in flight sends nothing.
        assert_eq!(app.handle(Action::Confirm), Effect::None);

        let created = Contact::new(ContactId::now_v7(), expected);
        app.apply(Outcome::Created(Ok(created.clone())));
        assert_eq!(app.cache.contacts(), &[created]);
        assert_eq!(app.create_form, ContactForm::create());
    }

    #[test]
    fn test_create_blank_required_sends_nothing() {
        let mut app = loaded(Vec::new());
        app.handle(Action::FocusForm);
        type_into(&mut app, "A");
        assert_eq!(app.handle(Action::Confirm), Effect::None);
        assert_eq!(app.create_form.error.as_deref(), Some(REQUIRED_FIELDS_MESSAGE));
    }

    #[test]
    fn test_create_duplicate_keeps_input() {
        let mut app = loaded(Vec::new());
        app.create_form.set_value(ContactField::Email, "a@b.com");
        app.apply(Outcome::Created(Err(duplicate())));
        assert_eq!(app.create_form.error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
        assert_eq!(app.create_form.value(ContactField::Email), "a@b.com");
        assert!(app.cache.is_empty());
    }

    #[test]
    fn test_edit_hides_table_until_done() {
        let original = contact("A", "a@b.com");
        let mut app = loaded(vec![original.clone()]);

        app.handle(Action::EditItem);
        assert!(app.is_editing());
        assert_eq!(app.input_mode(), InputMode::Editing);

        app.handle(Action::Backspace);
        type_into(&mut app, "Z");
        let effect = app.handle(Action::Confirm);
        let Effect::Run(Command::Update { id, fields }) = effect else {
            panic!("expected update, got {:?}", effect);
        };
        assert_eq!(id, original.id);
        assert_eq!(fields.first_name, "Z");

        let updated = Contact::new(id, fields);
        app.apply(Outcome::Updated {
            id,
            result: Ok(updated.clone()),
        });
        assert!(!app.is_editing());
        assert_eq!(app.cache.get(id), Some(&updated));
    }

    #[test]
    fn test_edit_cancel_restores_table() {
        let mut app = loaded(vec![contact("A", "a@b.com")]);
        app.handle(Action::EditItem);
        app.handle(Action::Cancel);
        assert_eq!(app.list.panel, ListPanel::Table);
        assert_eq!(app.input_mode(), InputMode::Navigate);
    }

    #[test]
    fn test_update_error_shown_in_editor() {
        let original = contact("A", "a@b.com");
        let mut app = loaded(vec![original.clone()]);
        app.begin_edit();
        app.apply(Outcome::Updated {
            id: original.id,
            result: Err(duplicate()),
        });
        let ListPanel::Edit(form) = &app.list.panel else {
            panic!("editor closed");
        };
        assert_eq!(form.error.as_deref(), Some(DUPLICATE_EMAIL_MESSAGE));
        assert_eq!(app.cache.get(original.id), Some(&original));
    }

    #[test]
    fn test_delete_is_two_phase() {
        let target = contact("A", "a@b.com");
        let mut app = loaded(vec![target.clone(), contact("B", "c@d.com")]);

        assert_eq!(app.handle(Action::DeleteItem), Effect::None);
        assert_eq!(app.input_mode(), InputMode::Confirming);
        assert_eq!(app.confirm.as_ref().map(|c| c.id), Some(target.id));

        let effect = app.handle(Action::Confirm);
        assert_eq!(effect, Effect::Run(Command::Delete { id: target.id }));
        assert!(app.confirm.is_none());

        app.apply(Outcome::Deleted {
            id: target.id,
            result: Ok(()),
        });
        assert_eq!(app.cache.len(), 1);
        assert!(app.cache.get(target.id).is_none());
    }

    #[test]
    fn test_delete_cancel_sends_nothing() {
        let mut app = loaded(vec![contact("A", "a@b.com")]);
        app.handle(Action::DeleteItem);
        assert_eq!(app.handle(Action::Cancel), Effect::None);
        assert!(app.confirm.is_none());
        assert_eq!(app.cache.len(), 1);
    }

    #[test]
    fn test_request_delete_unknown_id() {
        let mut app = loaded(Vec::new());
        assert!(!app.request_delete(ContactId::now_v7()));
        assert!(app.confirm_delete().is_none());
    }

    #[test]
    fn test_delete_failure_keeps_row() {
        let target = contact("A", "a@b.com");
        let mut app = loaded(vec![target.clone()]);
        app.apply(Outcome::Deleted {
            id: target.id,
            result: Err(ApiClientError::Api {
                status: 404,
                code: Some(ErrorCode::ContactNotFound),
                message: "Contact not found".to_string(),
            }),
        });
        assert_eq!(app.cache.len(), 1);
        assert_eq!(app.notifications.last().map(|n| n.level), Some(NotificationLevel::Error));
    }

    #[test]
    fn test_refresh_after_mutation_refetches() {
        let mut app = App::new(TuiConfig {
            refresh_after_mutation: true,
            ..config()
        });
        let created = contact("A", "a@b.com");
        let effect = app.apply(Outcome::Created(Ok(created)));
        assert_eq!(effect, Effect::Run(Command::FetchAll));
        assert!(app.cache.is_empty());
    }

    #[test]
    fn test_delete_last_row_on_page_clamps() {
        let contacts: Vec<Contact> = (0..6)
            .map(|i| contact(&format!("N{}", i), &format!("n{}@x.com", i)))
            .collect();
        let mut app = loaded(contacts);
        app.handle(Action::NextPage);
        assert_eq!(app.list.pagination.page(), 1);

        let last = app.selected_contact().map(|c| c.id).unwrap();
        app.apply(Outcome::Deleted {
            id: last,
            result: Ok(()),
        });
        assert_eq!(app.list.pagination.page(), 0);
        assert_eq!(app.visible_rows().len(), 5);
    }

    #[test]
    fn test_sort_keys_toggle() {
        let mut app = loaded(vec![contact("b", "b@x.com"), contact("A", "a@x.com")]);
        assert_eq!(app.visible_rows()[0].fields.first_name, "A");
        app.handle(Action::SortBy(ContactField::FirstName));
        assert_eq!(app.list.sort.direction, SortDirection::Desc);
        assert_eq!(app.visible_rows()[0].fields.first_name, "b");
    }

    #[test]
    fn test_restore_and_persist() {
        let mut app = App::new(config());
        let state = PersistedState {
            sort: SortState {
                column: ContactField::Email,
                direction: SortDirection::Desc,
            },
            page_size: 25,
        };
        app.restore(&state);
        assert_eq!(app.persisted(), state);

        app.restore(&PersistedState {
            page_size: 0,
            ..state
        });
        assert_eq!(app.list.pagination.page_size(), 5);
    }

    #[test]
    fn test_prune_notifications() {
        let mut app = App::new(config());
        app.notify(NotificationLevel::Info, "hello");
        let created = app.notifications[0].created_at;
        app.prune_notifications(created + chrono::Duration::seconds(1));
        assert_eq!(app.notifications.len(), 1);
        app.prune_notifications(created + chrono::Duration::seconds(5));
        assert!(app.notifications.is_empty());
    }
}
