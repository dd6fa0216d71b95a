use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::api::TodoApi;
use crate::dates::{self, DateFormat};
use crate::model::{sort_by_priority, Draft, Priority, Task};

/// Transient error/success messages clear this long after being set.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
}

/// The draft buffer behind the add/edit panel. Due date is held as
/// `yyyy-MM-dd` text and converted to the wire format at submit time.
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
    pub focused: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            due_date: String::new(),
            focused: FormField::Title,
            error: None,
        }
    }

    /// Pre-fill from an existing task for editing. The stored due date is
    /// converted to date-input text; absent or unparsable dates leave the
    /// field blank.
    pub fn from_task(task: &Task) -> Self {
        let due_date = match task.due_date.as_deref() {
            Some(raw) => {
                let text = dates::safe_format_date(Some(raw), DateFormat::Iso);
                if text == "Unknown" || text == "Invalid Date" {
                    String::new()
                } else {
                    text
                }
            }
            None => String::new(),
        };
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date,
            focused: FormField::Title,
            error: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Text buffer for the focused field; `None` while priority is focused.
    pub fn focused_buf_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::DueDate,
            FormField::Description => FormField::Title,
            FormField::Priority => FormField::Description,
            FormField::DueDate => FormField::Priority,
        };
    }

    /// Title must be non-empty after trimming. Client-side gate only.
    pub fn validate(&mut self) -> bool {
        if self.title.trim().is_empty() {
            self.error = Some("Title must not be empty".into());
            return false;
        }
        self.error = None;
        true
    }

    pub fn draft(&self) -> anyhow::Result<Draft> {
        Ok(Draft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: dates::form_date_to_wire(&self.due_date)?,
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

/// Modal state for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    ConfirmDelete { id: String, title: String },
}

/// All client state for the board. Network calls go through the injected
/// `TodoApi`; every mutation re-fetches the full list rather than patching
/// local state.
pub struct App {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub message_set_at: Option<Instant>,
    pub editing: Option<Task>,
    pub form: TaskForm,
    pub cursor: usize,
    pub list_state: ListState,
    pub mode: Mode,
    pub focus: Focus,
}

impl App {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
            error: None,
            success: None,
            message_set_at: None,
            editing: None,
            form: TaskForm::new(),
            cursor: 0,
            list_state: ListState::default(),
            mode: Mode::Normal,
            focus: Focus::Form,
        }
    }

    /// Tasks in display order.
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        sort_by_priority(&self.tasks)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.sorted_tasks().get(self.cursor).copied()
    }

    pub fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.success = None;
        self.message_set_at = Some(Instant::now());
    }

    pub fn set_success(&mut self, message: &str) {
        self.success = Some(message.to_string());
        self.error = None;
        self.message_set_at = Some(Instant::now());
    }

    /// Clear expired messages. Setting a new message moves `message_set_at`
    /// forward, which supersedes any earlier pending clear.
    pub fn tick(&mut self, now: Instant) {
        if let Some(set_at) = self.message_set_at {
            if now.duration_since(set_at) >= MESSAGE_TTL {
                self.error = None;
                self.success = None;
                self.message_set_at = None;
            }
        }
    }

    /// Fetch all tasks and replace local state wholesale. A `success=false`
    /// body is a silent no-op; only transport failures set the error string.
    pub fn refresh(&mut self, api: &dyn TodoApi) {
        match api.list() {
            Ok(env) => {
                if env.success {
                    self.tasks = env.data.unwrap_or_default();
                }
            }
            Err(_) => self.set_error("Failed to fetch todos"),
        }
        self.loading = false;
        self.clamp_cursor();
    }

    /// Create or update from the form. Editing target decides which call is
    /// made; both re-fetch the list and reset the form on success.
    pub fn submit(&mut self, api: &dyn TodoApi) {
        if !self.form.validate() {
            return;
        }
        let draft = match self.form.draft() {
            Ok(draft) => draft,
            Err(_) => {
                self.set_error("Failed to save todo");
                return;
            }
        };
        match &self.editing {
            Some(task) => {
                let id = task.id.clone();
                match api.update(&id, &draft) {
                    Ok(env) => {
                        if env.success {
                            self.set_success("Todo updated successfully!");
                            self.editing = None;
                            self.form.reset();
                            self.refresh(api);
                        }
                    }
                    Err(_) => self.set_error("Failed to save todo"),
                }
            }
            None => match api.create(&draft) {
                Ok(env) => {
                    if env.success {
                        self.set_success("Todo created successfully!");
                        self.form.reset();
                        self.refresh(api);
                    }
                }
                Err(_) => self.set_error("Failed to save todo"),
            },
        }
    }

    /// Load the selected task into the form and mark it as the edit target.
    pub fn start_edit(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            self.form = TaskForm::from_task(&task);
            self.editing = Some(task);
            self.focus = Focus::Form;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.reset();
    }

    /// Open the confirmation modal for the selected task.
    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.mode = Mode::ConfirmDelete {
                id: task.id.clone(),
                title: task.title.clone(),
            };
        }
    }

    /// Issue the delete the user just confirmed.
    pub fn confirm_delete(&mut self, api: &dyn TodoApi) {
        let Mode::ConfirmDelete { id, .. } = std::mem::replace(&mut self.mode, Mode::Normal)
        else {
            return;
        };
        match api.delete(&id) {
            Ok(env) => {
                if env.success {
                    self.set_success("Todo deleted successfully!");
                    self.refresh(api);
                }
            }
            Err(_) => self.set_error("Failed to delete todo"),
        }
    }

    /// Flip the selected task's completed flag. The server owns the flip;
    /// the follow-up refresh is the only thing that changes local state.
    pub fn toggle_selected(&mut self, api: &dyn TodoApi) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        match api.toggle(&id) {
            Ok(env) => {
                if env.success {
                    self.refresh(api);
                }
            }
            Err(_) => self.set_error("Failed to toggle todo status"),
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if !self.tasks.is_empty() && self.cursor < self.tasks.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Clamp cursor after the list changes (e.g. after a refresh).
    pub fn clamp_cursor(&mut self) {
        if self.tasks.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            if self.cursor >= self.tasks.len() {
                self.cursor = self.tasks.len() - 1;
            }
            self.list_state.select(Some(self.cursor));
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Envelope;
    use anyhow::{anyhow, Result};
    use std::cell::RefCell;

    /// In-memory backend that records calls and serves canned tasks.
    struct FakeApi {
        tasks: RefCell<Vec<Task>>,
        calls: RefCell<Vec<String>>,
        fail: bool,
        next_id: RefCell<u32>,
    }

    impl FakeApi {
        fn new(tasks: Vec<Task>) -> Self {
            Self {
                tasks: RefCell::new(tasks),
                calls: RefCell::new(Vec::new()),
                fail: false,
                next_id: RefCell::new(100),
            }
        }

        fn failing() -> Self {
            let mut api = Self::new(Vec::new());
            api.fail = true;
            api
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn ok<T>(&self, data: Option<T>) -> Result<Envelope<T>> {
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(Envelope {
                success: true,
                message: None,
                data,
                error: None,
            })
        }
    }

    impl TodoApi for FakeApi {
        fn list(&self) -> Result<Envelope<Vec<Task>>> {
            self.calls.borrow_mut().push("list".into());
            let tasks = self.tasks.borrow().clone();
            self.ok(Some(tasks))
        }

        fn create(&self, draft: &Draft) -> Result<Envelope<Task>> {
            self.calls.borrow_mut().push(format!("create {}", draft.title));
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            let mut next_id = self.next_id.borrow_mut();
            let task = Task {
                id: format!("t{}", *next_id),
                title: draft.title.clone(),
                description: draft.description.clone(),
                completed: false,
                priority: draft.priority,
                due_date: draft.due_date.clone(),
                created_at: "2025-01-01T00:00:00Z".into(),
                updated_at: "2025-01-01T00:00:00Z".into(),
            };
            *next_id += 1;
            self.tasks.borrow_mut().push(task.clone());
            self.ok(Some(task))
        }

        fn update(&self, id: &str, draft: &Draft) -> Result<Envelope<Task>> {
            self.calls.borrow_mut().push(format!("update {id}"));
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == id).unwrap();
            task.title = draft.title.clone();
            task.description = draft.description.clone();
            task.priority = draft.priority;
            task.due_date = draft.due_date.clone();
            let task = task.clone();
            drop(tasks);
            self.ok(Some(task))
        }

        fn delete(&self, id: &str) -> Result<Envelope<Task>> {
            self.calls.borrow_mut().push(format!("delete {id}"));
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            self.tasks.borrow_mut().retain(|t| t.id != id);
            self.ok(None)
        }

        fn toggle(&self, id: &str) -> Result<Envelope<Task>> {
            self.calls.borrow_mut().push(format!("toggle {id}"));
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == id).unwrap();
            task.completed = !task.completed;
            let task = task.clone();
            drop(tasks);
            self.ok(Some(task))
        }
    }

    fn make_task(id: &str, title: &str, priority: Priority) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: "details".to_string(),
            completed: false,
            priority,
            due_date: Some("2025-06-15T00:00:00Z".to_string()),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn refresh_replaces_tasks_wholesale() {
        let api = FakeApi::new(vec![make_task("t1", "one", Priority::Low)]);
        let mut app = App::new();
        app.tasks = vec![make_task("stale", "old", Priority::High)];
        app.refresh(&api);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].id, "t1");
        assert!(!app.loading);
    }

    #[test]
    fn refresh_failure_keeps_prior_data_and_sets_error() {
        let api = FakeApi::failing();
        let mut app = App::new();
        app.tasks = vec![make_task("t1", "keep me", Priority::Medium)];
        app.refresh(&api);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.error.as_deref(), Some("Failed to fetch todos"));
    }

    #[test]
    fn empty_title_never_issues_a_request() {
        let api = FakeApi::new(Vec::new());
        let mut app = App::new();
        app.form.title = "   ".into();
        app.submit(&api);
        assert!(api.calls().is_empty());
        assert!(app.form.error.is_some());
    }

    #[test]
    fn create_resets_form_and_refreshes() {
        let api = FakeApi::new(Vec::new());
        let mut app = App::new();
        app.form.title = "Buy milk".into();
        app.form.priority = Priority::High;
        app.submit(&api);

        assert_eq!(app.success.as_deref(), Some("Todo created successfully!"));
        assert_eq!(app.form.title, "");
        assert_eq!(app.form.priority, Priority::Medium);
        assert!(app.editing.is_none());
        assert_eq!(api.calls(), vec!["create Buy milk".to_string(), "list".to_string()]);
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn edit_prefills_form_and_submits_update() {
        let task = make_task("t1", "old title", Priority::Low);
        let api = FakeApi::new(vec![task]);
        let mut app = App::new();
        app.refresh(&api);

        app.start_edit();
        assert!(app.editing.is_some());
        assert_eq!(app.form.title, "old title");
        assert_eq!(app.form.due_date, "2025-06-15");

        app.form.title = "new title".into();
        app.submit(&api);
        assert_eq!(app.success.as_deref(), Some("Todo updated successfully!"));
        assert!(app.editing.is_none());
        assert_eq!(app.tasks[0].title, "new title");
    }

    #[test]
    fn cancel_edit_clears_target_and_form() {
        let api = FakeApi::new(vec![make_task("t1", "one", Priority::Medium)]);
        let mut app = App::new();
        app.refresh(&api);
        app.start_edit();
        app.cancel_edit();
        assert!(app.editing.is_none());
        assert_eq!(app.form.title, "");
    }

    #[test]
    fn save_failure_sets_static_error() {
        let api = FakeApi::failing();
        let mut app = App::new();
        app.form.title = "anything".into();
        app.submit(&api);
        assert_eq!(app.error.as_deref(), Some("Failed to save todo"));
    }

    #[test]
    fn unparsable_due_date_is_a_save_failure() {
        let api = FakeApi::new(Vec::new());
        let mut app = App::new();
        app.form.title = "task".into();
        app.form.due_date = "someday".into();
        app.submit(&api);
        assert_eq!(app.error.as_deref(), Some("Failed to save todo"));
        // No create call was issued for the bad draft.
        assert!(api.calls().is_empty());
    }

    #[test]
    fn toggle_only_flips_completed() {
        let task = make_task("t1", "one", Priority::Medium);
        let api = FakeApi::new(vec![task.clone()]);
        let mut app = App::new();
        app.refresh(&api);

        app.toggle_selected(&api);
        assert_eq!(api.calls(), vec!["list", "toggle t1", "list"]);
        let after = &app.tasks[0];
        assert!(after.completed);
        assert_eq!(after.title, task.title);
        assert_eq!(after.description, task.description);
        assert_eq!(after.priority, task.priority);
        assert_eq!(after.due_date, task.due_date);
    }

    #[test]
    fn delete_requires_confirmation() {
        let api = FakeApi::new(vec![make_task("t1", "one", Priority::Medium)]);
        let mut app = App::new();
        app.refresh(&api);

        app.request_delete();
        assert!(matches!(app.mode, Mode::ConfirmDelete { .. }));
        // Nothing sent yet.
        assert_eq!(api.calls(), vec!["list"]);

        app.confirm_delete(&api);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(api.calls(), vec!["list", "delete t1", "list"]);
        assert!(app.tasks.is_empty());
        assert_eq!(app.success.as_deref(), Some("Todo deleted successfully!"));
    }

    #[test]
    fn create_then_delete_round_trip() {
        let api = FakeApi::new(vec![make_task("t0", "existing", Priority::Medium)]);
        let mut app = App::new();
        app.refresh(&api);

        app.form.title = "Buy milk".into();
        app.form.priority = Priority::High;
        app.submit(&api);

        // High priority sorts first.
        let sorted = app.sorted_tasks();
        assert_eq!(sorted[0].title, "Buy milk");

        app.cursor = 0;
        app.request_delete();
        app.confirm_delete(&api);
        assert!(app.tasks.iter().all(|t| t.title != "Buy milk"));
    }

    #[test]
    fn messages_expire_after_ttl() {
        let mut app = App::new();
        app.set_error("Failed to fetch todos");
        let set_at = app.message_set_at.unwrap();

        app.tick(set_at + Duration::from_secs(4));
        assert!(app.error.is_some());

        app.tick(set_at + Duration::from_secs(5));
        assert!(app.error.is_none());
        assert!(app.message_set_at.is_none());
    }

    #[test]
    fn replacing_a_message_resets_the_timer() {
        let mut app = App::new();
        app.set_error("Failed to fetch todos");
        let first_set = app.message_set_at.unwrap();

        app.set_success("Todo created successfully!");
        assert!(app.error.is_none());

        // The first message's deadline must no longer clear anything.
        app.tick(first_set + Duration::from_secs(5));
        assert_eq!(app.success.as_deref(), Some("Todo created successfully!"));

        let second_set = app.message_set_at.unwrap();
        app.tick(second_set + Duration::from_secs(5));
        assert!(app.success.is_none());
    }

    #[test]
    fn form_from_task_ignores_bad_due_date() {
        let mut task = make_task("t1", "one", Priority::Medium);
        task.due_date = Some("garbage".into());
        let form = TaskForm::from_task(&task);
        assert_eq!(form.due_date, "");
    }

    #[test]
    fn form_field_cycle_covers_all_fields() {
        let mut form = TaskForm::new();
        let mut seen = vec![form.focused];
        for _ in 0..3 {
            form.next_field();
            seen.push(form.focused);
        }
        assert_eq!(
            seen,
            vec![
                FormField::Title,
                FormField::Description,
                FormField::Priority,
                FormField::DueDate
            ]
        );
        form.next_field();
        assert_eq!(form.focused, FormField::Title);
        form.prev_field();
        assert_eq!(form.focused, FormField::DueDate);
    }
}
