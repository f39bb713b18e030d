use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::models::{Category, DATE_FORMAT};
use crate::tracker::{Overview, Tracker};
use crate::validate::TransactionForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Transactions,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Transactions, Self::Insights]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transactions => write!(f, "Transactions"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Entry form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Date,
    Amount,
    Category,
    Description,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Date, Self::Amount, Self::Category, Self::Description]
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Description => "Description",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Date,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Amount => Self::Date,
            Self::Category => Self::Amount,
            Self::Description => Self::Category,
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteAll { count: usize },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,
    pub(crate) export_path: PathBuf,

    // Entry form
    pub(crate) form: TransactionForm,
    pub(crate) form_field: FormField,

    // Everything shown on both screens, replaced wholesale after each change
    pub(crate) overview: Overview,

    // Transactions table
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency: impl Into<String>, export_path: PathBuf, today: NaiveDate) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Transactions,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: currency.into(),
            export_path,

            form: TransactionForm::default(),
            form_field: FormField::Date,

            overview: Overview::default(),

            transaction_index: 0,
            transaction_scroll: 0,

            pending_action: None,

            visible_rows: 20,
        };
        app.reset_form(today);
        app
    }

    /// Re-reads the store. Called after every mutation so no figure on screen
    /// can drift from what is stored.
    pub(crate) fn refresh(&mut self, tracker: &Tracker) -> Result<()> {
        self.overview = tracker.overview()?;
        let len = self.overview.transactions.len();
        if self.transaction_index >= len {
            self.transaction_index = len.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn money(&self, amount: rust_decimal::Decimal) -> String {
        super::util::format_amount(amount, &self.currency)
    }

    // ── Entry form ────────────────────────────────────────────

    pub(crate) fn reset_form(&mut self, today: NaiveDate) {
        self.form = TransactionForm {
            date: today.format(DATE_FORMAT).to_string(),
            amount: String::new(),
            category: Category::all()[0].to_string(),
            description: String::new(),
        };
        self.form_field = FormField::Date;
    }

    pub(crate) fn start_editing(&mut self) {
        self.screen = Screen::Transactions;
        self.input_mode = InputMode::Editing;
        self.form_field = FormField::Date;
    }

    pub(crate) fn form_value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => self.form.date.as_str(),
            FormField::Amount => self.form.amount.as_str(),
            FormField::Category => self.form.category.as_str(),
            FormField::Description => self.form.description.as_str(),
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.form_field {
            FormField::Date => Some(&mut self.form.date),
            FormField::Amount => Some(&mut self.form.amount),
            FormField::Description => Some(&mut self.form.description),
            FormField::Category => None,
        }
    }

    /// Types into the focused field. The category field only cycles.
    pub(crate) fn push_char(&mut self, c: char) {
        if self.form_field == FormField::Category {
            if c == ' ' {
                self.cycle_category(true);
            }
            return;
        }
        if let Some(field) = self.text_field_mut() {
            field.push(c);
        }
    }

    pub(crate) fn pop_char(&mut self) {
        if let Some(field) = self.text_field_mut() {
            field.pop();
        }
    }

    pub(crate) fn cycle_category(&mut self, forward: bool) {
        let current = Category::parse(&self.form.category).unwrap_or(Category::all()[0]);
        let next = if forward { current.next() } else { current.prev() };
        self.form.category = next.to_string();
    }

    pub(crate) fn next_field(&mut self) {
        self.form_field = self.form_field.next();
    }

    pub(crate) fn prev_field(&mut self) {
        self.form_field = self.form_field.prev();
    }

    /// Sends the form through the tracker. A rejected form stays on screen
    /// with the reason in the status line; an accepted one is cleared except
    /// for its date and category.
    pub(crate) fn submit_form(&mut self, tracker: &Tracker) -> Result<()> {
        match tracker.add(&self.form) {
            Ok(id) => {
                self.form.amount.clear();
                self.form.description.clear();
                self.form_field = FormField::Amount;
                self.refresh(tracker)?;
                self.set_status(format!("Added transaction #{id}"));
                Ok(())
            }
            Err(Error::Validation(e)) => {
                self.set_status(e.to_string());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Mutations outside the form ────────────────────────────

    pub(crate) fn delete_latest(&mut self, tracker: &mut Tracker) -> Result<()> {
        match tracker.delete_latest()? {
            Some(id) => {
                self.refresh(tracker)?;
                self.set_status(format!("Deleted transaction #{id}"));
            }
            None => self.set_status("No transactions to delete"),
        }
        Ok(())
    }

    pub(crate) fn request_delete_all(&mut self) {
        let count = self.overview.transactions.len();
        if count == 0 {
            self.set_status("No transactions to delete");
            return;
        }
        self.pending_action = Some(PendingAction::DeleteAll { count });
        self.input_mode = InputMode::Confirm;
    }

    /// Question shown in the command bar while an action awaits `y`.
    pub(crate) fn confirm_prompt(&self) -> Option<String> {
        match self.pending_action.as_ref()? {
            PendingAction::DeleteAll { count } => Some(format!("Delete all {count} transactions?")),
        }
    }

    pub(crate) fn confirm_pending(&mut self, tracker: &mut Tracker) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteAll { .. } => {
                    let removed = tracker.delete_all()?;
                    self.refresh(tracker)?;
                    self.set_status(format!("Deleted {removed} transactions"));
                }
            }
        }
        self.input_mode = InputMode::Normal;
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }

    pub(crate) fn export(&mut self, tracker: &Tracker, path: Option<&Path>) -> Result<()> {
        let path = path.unwrap_or(self.export_path.as_path()).to_path_buf();
        let count = tracker.export_csv(&path)?;
        if count == 0 {
            self.set_status("No transactions to export");
        } else {
            self.set_status(format!("Exported {count} transactions to {}", path.display()));
        }
        Ok(())
    }
}
