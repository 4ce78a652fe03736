//! Listing form pane: text inputs and image path bound to the form controller

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::warn;

use crate::{
    listing::{ListingForm, SubmitOutcome},
    models::DraftField,
    tui::{
        components::{Form, FormField, FormFieldType, StatusMessage, StatusType},
        traits::FormHandler,
        ui::Styles,
    },
};

pub struct ListingScreen {
    pub form: Form,
    pub controller: ListingForm,
    /// Path the draft's image was read from, if it came from the path input
    attached_path: Option<String>,
}

impl ListingScreen {
    pub fn new(controller: ListingForm) -> Self {
        let form = Form::new(vec![
            FormField::new(DraftField::Name.as_str(), "Name", FormFieldType::Text)
                .with_placeholder("name")
                .required(),
            FormField::new(DraftField::Category.as_str(), "Category", FormFieldType::Text)
                .with_placeholder("category"),
            FormField::new(DraftField::Image.as_str(), "Image file", FormFieldType::FilePath)
                .with_placeholder("path/to/image.jpg (Enter to attach)")
                .required(),
        ]);

        Self {
            form,
            controller,
            attached_path: None,
        }
    }

    /// Handle a key press and return what the status bar should show, if anything
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Option<StatusMessage> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Enter => {
                let on_image = self
                    .form
                    .current()
                    .map(|field| field.field_type == FormFieldType::FilePath)
                    .unwrap_or(false);
                return Some(if on_image {
                    self.attach_image()
                } else {
                    self.submit().await
                });
            }
            KeyCode::Char(c) => {
                self.form.handle_char_input(c);
                self.sync_current_field();
            }
            KeyCode::Backspace => {
                self.form.handle_backspace();
                self.sync_current_field();
            }
            KeyCode::Delete => {
                self.form.handle_delete();
                self.sync_current_field();
            }
            KeyCode::Left => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.form.current_mut() {
                    field.move_cursor_to_end();
                }
            }
            _ => {}
        }
        None
    }

    /// Push the focused text input's value into the controller
    fn sync_current_field(&mut self) {
        let Some(field) = self.form.current() else {
            return;
        };
        if field.field_type != FormFieldType::Text {
            return;
        }

        let (name, value) = (field.name.clone(), field.value.clone());
        if let Err(e) = self.controller.on_named_field_change(&name, &value) {
            warn!("Ignoring input change: {}", e);
        }
    }

    /// Select the file named in the image input; an empty input clears the selection
    fn attach_image(&mut self) -> StatusMessage {
        let image_field = DraftField::Image.as_str();
        let path = self.form.value_of(image_field).trim().to_string();

        if path.is_empty() {
            if let Err(e) = self.controller.on_file_change(image_field, Vec::new()) {
                return StatusMessage::error(e.to_string());
            }
            self.attached_path = None;
            return StatusMessage::info("Image cleared".to_string());
        }

        let attached = self.controller.attach_image(Path::new(&path));
        match attached {
            Ok(()) => {
                self.attached_path = Some(path);
                let (file_name, size) = self
                    .controller
                    .draft()
                    .image
                    .as_ref()
                    .map(|image| (image.file_name.clone(), image.bytes.len()))
                    .unwrap_or_default();
                StatusMessage::success(format!("Attached {} ({} bytes)", file_name, size))
            }
            Err(e) => {
                if let Some(field) = self.form.get_field_mut(image_field) {
                    field.validation_error = Some("cannot read file".to_string());
                }
                StatusMessage::error(e.to_string())
            }
        }
    }

    async fn submit(&mut self) -> StatusMessage {
        // The path input wins over a stale attachment: a changed path is
        // re-read and an emptied one clears the image
        let typed_path = self.form.value_of(DraftField::Image.as_str()).trim();
        if typed_path != self.attached_path.as_deref().unwrap_or("") {
            let attached = self.attach_image();
            if attached.status_type == StatusType::Error {
                return attached;
            }
        }

        let outcome = self.controller.on_submit().await;

        if outcome.was_attempted() {
            self.form.clear_all();
            self.attached_path = None;
        }

        match &outcome {
            SubmitOutcome::Listed => StatusMessage::success(outcome.message()),
            SubmitOutcome::Failed(_) => StatusMessage::error(outcome.message()),
            SubmitOutcome::Blocked(missing) => {
                for field in &missing.0 {
                    if let Some(input) = self.form.get_field_mut(field.as_str()) {
                        input.validation_error = Some("required".to_string());
                    }
                }
                StatusMessage::warning(outcome.message())
            }
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title("List an item")
            .borders(Borders::ALL)
            .border_style(if focused {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints: Vec<Constraint> =
            self.form.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Min(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.form.fields.iter().enumerate() {
            field.render(f, chunks[i], focused);
        }

        let attachment = match &self.controller.draft().image {
            Some(image) => Span::styled(
                format!("Attached: {} ({} bytes)", image.file_name, image.bytes.len()),
                Styles::success(),
            ),
            None => Span::styled("No image attached", Styles::inactive()),
        };
        let hint = Paragraph::new(vec![
            Line::from(attachment),
            Line::from(Span::styled(
                "Tab: next field | Enter: attach image / list this item",
                Styles::inactive(),
            )),
        ]);
        f.render_widget(hint, chunks[self.form.fields.len()]);
    }
}
