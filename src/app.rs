use crate::config::AppConfig;
use crate::domain::{visible_rows, FlatRow, ModalKind, Stage, Task, TaskStatus, UiMode};
use crate::generation::{
    parse_due_date, GeneratedPlan, GenerationRequest, Generator, PendingGeneration,
    SimulatedGenerator,
};
use ratatui::layout::Rect;
use std::mem;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Number of fields in the add-task form (title, due date)
const ADD_FORM_FIELDS: usize = 2;
/// Number of fields in the generate form (objective, due date, priority, scope)
const GENERATE_FORM_FIELDS: usize = 4;

/// Input form state for the add/edit task dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTaskForm {
    pub title: String,
    pub due: String,
    pub editing_field: usize, // 0 = title, 1 = due date
    /// Task being edited; None adds a new task
    pub target: Option<Uuid>,
}

impl AddTaskForm {
    fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due: task
                .due
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            editing_field: 0,
            target: Some(task.id),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    fn field_mut(&mut self) -> &mut String {
        match self.editing_field {
            0 => &mut self.title,
            _ => &mut self.due,
        }
    }
}

/// State of the generate-task dialog while it is open
#[derive(Debug, Clone)]
pub struct GenerateModal {
    pub stage: Stage,
    pub form: GenerationRequest,
    pub editing_field: usize, // 0 = objective, 1 = due date, 2 = priority, 3 = scope
    /// Request waiting on its delay (Loading only)
    pub pending: Option<PendingGeneration>,
    pub preview: Option<GeneratedPlan>,
}

impl GenerateModal {
    fn new() -> Self {
        Self {
            stage: Stage::Form,
            form: GenerationRequest::default(),
            editing_field: 0,
            pending: None,
            preview: None,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.editing_field {
            0 => &mut self.form.objective,
            1 => &mut self.form.due_date,
            2 => &mut self.form.priority,
            _ => &mut self.form.scope,
        }
    }
}

/// Main application state
pub struct AppState {
    pub tasks: Vec<Task>,
    /// Tasks checked off and detached this session
    pub completed: Vec<Task>,
    pub active_tab: TaskStatus,
    /// Index into the visible rows
    pub selected_index: usize,
    /// First visible row of the list pane
    pub list_scroll_offset: usize,
    /// Open dialogs, bottom to top
    pub modals: Vec<ModalKind>,
    pub add_form: Option<AddTaskForm>,
    pub generate: Option<GenerateModal>,
    pub generator: Box<dyn Generator>,
    pub next_ticket: u64,
    pub slide_out: Duration,
    pub generation_delay: Duration,
    pub use_emoji: bool,
    pub last_tick: Instant,
    /// Increments every tick (drives the loading spinner)
    pub animation_frame: u32,
    /// Terminal area of the last render, for mouse hit testing
    pub viewport: Rect,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, config: &AppConfig, initial_tab: TaskStatus) -> Self {
        let mut app = Self {
            tasks,
            completed: Vec::new(),
            active_tab: initial_tab,
            selected_index: 0,
            list_scroll_offset: 0,
            modals: Vec::new(),
            add_form: None,
            generate: None,
            generator: Box::new(SimulatedGenerator),
            next_ticket: 1,
            slide_out: config.slide_out(),
            generation_delay: config.generation_delay(),
            use_emoji: config.use_emoji,
            last_tick: Instant::now(),
            animation_frame: 0,
            viewport: Rect::default(),
        };
        app.filter_tasks(initial_tab);
        app
    }

    /// Mode of the topmost dialog
    pub fn ui_mode(&self) -> UiMode {
        UiMode::from(self.top_modal())
    }

    pub fn top_modal(&self) -> Option<ModalKind> {
        self.modals.last().copied()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.modals.contains(&kind)
    }

    /// Current generate-dialog stage, if the dialog is open
    pub fn stage(&self) -> Option<Stage> {
        self.generate.as_ref().map(|m| m.stage)
    }

    /// Rows shown under the active tab
    pub fn rows(&self) -> Vec<FlatRow> {
        visible_rows(&self.tasks, self.active_tab)
    }

    /// Show only tasks whose status equals `status`
    pub fn filter_tasks(&mut self, status: TaskStatus) {
        self.active_tab = status;
        self.clamp_selection();
    }

    /// Activate a tab (the previous one is deactivated) and refilter
    pub fn select_tab(&mut self, status: TaskStatus) {
        if status != self.active_tab {
            debug!(tab = status.to_tag(), "tab selected");
            self.selected_index = 0;
            self.list_scroll_offset = 0;
        }
        self.filter_tasks(status);
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.select_tab(self.active_tab.prev());
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.rows().len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_row(&mut self, row: usize) {
        if row < self.rows().len() {
            self.selected_index = row;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move the scroll offset so the selected row is one of `height` rows
    pub fn scroll_to_selection(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected_index < self.list_scroll_offset {
            self.list_scroll_offset = self.selected_index;
        } else if self.selected_index >= self.list_scroll_offset + height {
            self.list_scroll_offset = self.selected_index + 1 - height;
        }
        let max_offset = self.rows().len().saturating_sub(height);
        self.list_scroll_offset = self.list_scroll_offset.min(max_offset);
    }

    fn row_task(&self, flat: &FlatRow) -> Option<&Task> {
        let task = self.tasks.get(flat.task_index)?;
        match flat.subtask_index {
            Some(st_idx) => task.subtasks.get(st_idx),
            None => Some(task),
        }
    }

    /// Task behind a visible row
    pub fn task_at(&self, row: usize) -> Option<&Task> {
        let flat = self.rows().into_iter().nth(row)?;
        self.row_task(&flat)
    }

    /// Select the row showing task `id`, or clamp when it is gone
    fn select_task_id(&mut self, id: Option<Uuid>) {
        let row = id.and_then(|id| {
            self.rows()
                .iter()
                .position(|flat| self.row_task(flat).is_some_and(|t| t.id == id))
        });
        match row {
            Some(row) => self.selected_index = row,
            None => self.clamp_selection(),
        }
    }

    fn find_task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find_map(|task| {
            if task.id == id {
                Some(task)
            } else {
                task.subtasks.iter_mut().find(|st| st.id == id)
            }
        })
    }

    fn task_at_mut(&mut self, row: usize) -> Option<&mut Task> {
        let flat = self.rows().into_iter().nth(row)?;
        let task = self.tasks.get_mut(flat.task_index)?;
        match flat.subtask_index {
            Some(st_idx) => task.subtasks.get_mut(st_idx),
            None => Some(task),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.task_at(self.selected_index)
    }

    /// Flip the status indicator of a row
    pub fn toggle_status(&mut self, row: usize) {
        self.toggle_status_at(row, Instant::now());
    }

    pub fn toggle_status_at(&mut self, row: usize, now: Instant) {
        if let Some(task) = self.task_at_mut(row) {
            let checked = task.toggle_checked(now);
            debug!(title = %task.title, checked, "status toggled");
        }
    }

    pub fn toggle_selected_status(&mut self) {
        self.toggle_status(self.selected_index);
    }

    /// Expand or collapse the nearest parent task of a row
    pub fn toggle_expand(&mut self, row: usize) {
        let Some(flat) = self.rows().into_iter().nth(row) else {
            return;
        };
        // Its parent is not on screen
        if flat.is_loose_subtask() {
            return;
        }
        if let Some(task) = self.tasks.get_mut(flat.task_index) {
            if task.is_parent() {
                task.toggle_expanded();
            }
        }
        self.clamp_selection();
        // Keep the cursor on the parent when its children disappear
        if flat.subtask_index.is_some() {
            if let Some(parent_row) = self
                .rows()
                .iter()
                .position(|r| r.task_index == flat.task_index && r.subtask_index.is_none())
            {
                self.selected_index = parent_row;
            }
        }
    }

    pub fn toggle_expand_selected(&mut self) {
        self.toggle_expand(self.selected_index);
    }

    /// Detach every task whose slide-out has ended
    fn detach_finished(&mut self, now: Instant) {
        let length = self.slide_out;
        let selected = self.selected_task().map(|t| t.id);

        let (mut detached, kept): (Vec<Task>, Vec<Task>) = mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.removal_finished(now, length));
        self.tasks = kept;

        for task in &mut self.tasks {
            let (gone, kept): (Vec<Task>, Vec<Task>) = mem::take(&mut task.subtasks)
                .into_iter()
                .partition(|t| t.removal_finished(now, length));
            task.subtasks = kept;
            detached.extend(gone);
        }

        if detached.is_empty() {
            return;
        }
        for mut task in detached {
            info!(title = %task.title, from = task.status.to_tag(), "task detached after slide-out");
            task.mark_completed();
            self.completed.push(task);
        }
        self.select_task_id(selected);
    }

    /// Remove the selected task (a parent takes its subtasks with it)
    pub fn delete_selected(&mut self) {
        let Some(flat) = self.rows().into_iter().nth(self.selected_index) else {
            return;
        };
        let removed = match flat.subtask_index {
            Some(st_idx) => self
                .tasks
                .get_mut(flat.task_index)
                .filter(|t| st_idx < t.subtasks.len())
                .map(|t| t.subtasks.remove(st_idx)),
            None => (flat.task_index < self.tasks.len()).then(|| self.tasks.remove(flat.task_index)),
        };
        if let Some(task) = removed {
            info!(title = %task.title, subtasks = task.subtasks.len(), "task deleted");
        }
        self.clamp_selection();
    }

    /// Add a task directly
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Advance animations and pending work
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.detach_finished(now);
        self.resolve_generation(now);
        self.last_tick = now;
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Put a dialog on top of the stack
    pub fn open_modal(&mut self, kind: ModalKind) {
        self.modals.retain(|k| *k != kind);
        self.modals.push(kind);
    }

    /// Close a dialog and drop its state
    pub fn close_modal(&mut self, kind: ModalKind) {
        if !self.is_open(kind) {
            return;
        }
        self.modals.retain(|k| *k != kind);
        match kind {
            ModalKind::AddTask => self.add_form = None,
            ModalKind::GenerateTask => {
                if let Some(modal) = self.generate.take() {
                    if let Some(pending) = modal.pending {
                        info!(ticket = pending.ticket, "pending generation cancelled");
                    }
                }
            }
        }
    }

    /// Close whichever dialog is on top (Escape / backdrop click)
    pub fn close_top_modal(&mut self) {
        if let Some(kind) = self.top_modal() {
            self.close_modal(kind);
        }
    }

    /// Open the task dialog on the selected task
    pub fn open_edit_modal(&mut self) {
        let Some(form) = self.selected_task().map(AddTaskForm::for_task) else {
            return;
        };
        self.close_modal(ModalKind::AddTask);
        self.add_form = Some(form);
        self.open_modal(ModalKind::AddTask);
    }

    pub fn toggle_add_modal(&mut self) {
        if self.is_open(ModalKind::AddTask) {
            self.close_modal(ModalKind::AddTask);
        } else {
            self.add_form = Some(AddTaskForm::default());
            self.open_modal(ModalKind::AddTask);
        }
    }

    pub fn add_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.add_form {
            form.editing_field = (form.editing_field + 1) % ADD_FORM_FIELDS;
        }
    }

    pub fn add_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.add_form {
            form.field_mut().push(c);
        }
    }

    pub fn add_form_backspace(&mut self) {
        if let Some(form) = &mut self.add_form {
            form.field_mut().pop();
        }
    }

    /// Create a todo task from the form, or update the task being edited.
    /// An empty title keeps the dialog open.
    pub fn submit_add_form(&mut self) {
        let Some(form) = &self.add_form else {
            return;
        };
        let title = form.title.trim().to_string();
        if title.is_empty() {
            return;
        }
        let due = parse_due_date(&form.due);
        let target = form.target;

        match target {
            Some(id) => match self.find_task_mut(id) {
                Some(task) => {
                    info!(from = %task.title, to = %title, "task edited");
                    task.title = title;
                    task.due = due;
                }
                None => info!(title = %title, "edited task is gone; nothing saved"),
            },
            None => {
                info!(title = %title, "task added");
                self.add_task(Task::new(title, TaskStatus::Todo).with_due(due));
            }
        }
        self.close_modal(ModalKind::AddTask);
    }

    /// Open the generate dialog on a fresh form, dropping any previous run
    pub fn open_generate_modal(&mut self) {
        self.close_modal(ModalKind::GenerateTask);
        self.generate = Some(GenerateModal::new());
        self.open_modal(ModalKind::GenerateTask);
    }

    pub fn generate_form_next_field(&mut self) {
        if let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Form) {
            modal.editing_field = (modal.editing_field + 1) % GENERATE_FORM_FIELDS;
        }
    }

    pub fn generate_form_prev_field(&mut self) {
        if let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Form) {
            modal.editing_field =
                (modal.editing_field + GENERATE_FORM_FIELDS - 1) % GENERATE_FORM_FIELDS;
        }
    }

    pub fn generate_form_add_char(&mut self, c: char) {
        if let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Form) {
            modal.field_mut().push(c);
        }
    }

    pub fn generate_form_backspace(&mut self) {
        if let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Form) {
            modal.field_mut().pop();
        }
    }

    /// Form -> Loading
    pub fn begin_generation(&mut self) {
        self.begin_generation_at(Instant::now());
    }

    pub fn begin_generation_at(&mut self, now: Instant) {
        let ticket = self.next_ticket;
        let delay = self.generation_delay;
        let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Form) else {
            return;
        };

        let request = modal.form.clone();
        info!(
            ticket,
            objective = %request.objective,
            due_date = %request.due_date,
            priority = %request.priority,
            scope = %request.scope,
            "generation requested"
        );

        modal.pending = Some(PendingGeneration::new(ticket, now, delay, request));
        modal.preview = None;
        modal.stage = Stage::Loading;
        self.next_ticket += 1;
    }

    /// Loading -> Preview once the delay has elapsed
    fn resolve_generation(&mut self, now: Instant) {
        let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Loading) else {
            return;
        };
        if !modal.pending.as_ref().is_some_and(|p| p.is_ready(now)) {
            return;
        }
        let Some(pending) = modal.pending.take() else {
            return;
        };

        let plan = self.generator.generate(&pending.request);
        info!(ticket = pending.ticket, steps = plan.steps.len(), "generation ready");
        modal.preview = Some(plan);
        modal.stage = Stage::Preview;
    }

    /// Preview -> Form, keeping the entered inputs
    pub fn edit_generation(&mut self) {
        if let Some(modal) = self.generate.as_mut().filter(|m| m.stage == Stage::Preview) {
            modal.preview = None;
            modal.stage = Stage::Form;
        }
    }

    /// Preview -> closed, inserting the generated task
    pub fn confirm_generation(&mut self) {
        let plan = match self.generate.as_mut() {
            Some(modal) if modal.stage == Stage::Preview => modal.preview.take(),
            _ => None,
        };
        let Some(plan) = plan else {
            return;
        };
        info!(title = %plan.title, "generated task added");
        self.add_task(plan.into_task());
        self.close_modal(ModalKind::GenerateTask);
    }
}
