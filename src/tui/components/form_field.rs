//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::{traits::FormHandler, ui::Styles};

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    /// Path to a file on disk; the value is what the user typed, not the file
    FilePath,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    /// Input name the controller knows the field by
    pub name: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub required: bool,
    pub is_focused: bool,
    /// Cursor position in characters
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(name: &str, label: &str, field_type: FormFieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            required: false,
            is_focused: false,
            cursor_position: 0,
            validation_error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.value.insert(at, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_offset(self.cursor_position);
            self.value.remove(at);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_len() {
            let at = self.byte_offset(self.cursor_position);
            self.value.remove(at);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.validation_error = None;
    }

    /// Render the form field; focus only shows while its pane has focus
    pub fn render(&self, f: &mut Frame, area: Rect, pane_focused: bool) {
        let focused = self.is_focused && pane_focused;

        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let label = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        let title = match self.validation_error {
            Some(ref error) => format!("{} - {}", label, error),
            None => label,
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        if focused {
            let before_cursor: String = self.value.chars().take(self.cursor_position).collect();
            let cursor_x = area.x + 1 + before_cursor.width() as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn current(&self) -> Option<&FormField> {
        self.fields.get(self.current_field)
    }

    pub fn current_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Value of the named field, empty when there is no such field
    pub fn value_of(&self, name: &str) -> &str {
        self.get_field(name).map(|field| field.value.as_str()).unwrap_or("")
    }

    /// Clear every field and return focus to the first one
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
        self.update_focus();
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.current_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.current_mut() {
            field.delete_char_forward();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_with_multibyte_characters() {
        let mut field = FormField::new("name", "Name", FormFieldType::Text);
        for c in "椅子".chars() {
            field.insert_char(c);
        }
        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value, "椅x子");

        field.delete_char();
        field.delete_char_forward();
        assert_eq!(field.value, "椅");

        field.move_cursor_to_start();
        field.delete_char();
        assert_eq!(field.value, "椅");
    }

    #[test]
    fn test_form_focus_cycles() {
        let mut form = Form::new(vec![
            FormField::new("name", "Name", FormFieldType::Text),
            FormField::new("category", "Category", FormFieldType::Text),
        ]);
        assert!(form.fields[0].is_focused);

        form.next_field();
        assert!(form.fields[1].is_focused);
        assert!(!form.fields[0].is_focused);

        form.next_field();
        assert_eq!(form.current_field, 0);
        form.previous_field();
        assert_eq!(form.current_field, 1);
    }

    #[test]
    fn test_clear_all_resets_values_and_focus() {
        let mut form = Form::new(vec![
            FormField::new("name", "Name", FormFieldType::Text),
            FormField::new("image", "Image", FormFieldType::FilePath),
        ]);
        "Chair".chars().for_each(|c| form.handle_char_input(c));
        form.set_current_field(1);
        "/tmp/a.jpg".chars().for_each(|c| form.handle_char_input(c));
        assert_eq!(form.value_of("name"), "Chair");
        assert_eq!(form.value_of("image"), "/tmp/a.jpg");

        form.clear_all();
        assert_eq!(form.value_of("name"), "");
        assert_eq!(form.value_of("image"), "");
        assert_eq!(form.current_field, 0);
        assert_eq!(form.value_of("missing"), "");
    }
}
