//! Setup form: four text fields with grapheme-aware editing.

use unicode_segmentation::UnicodeSegmentation;

use cupid_types::ProposalDraft;

/// Longest value any field accepts, in graphemes.
const MAX_FIELD_LEN: usize = 80;
/// Byte cap per field. Four full fields still encode to a token the share
/// link decoder accepts.
const MAX_FIELD_BYTES: usize = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    SenderName,
    ReceiverName,
    SenderEmail,
    SenderPhone,
}

impl FormField {
    pub const ALL: [Self; 4] = [
        Self::SenderName,
        Self::ReceiverName,
        Self::SenderEmail,
        Self::SenderPhone,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SenderName => "Ton prénom",
            Self::ReceiverName => "Son prénom",
            Self::SenderEmail => "Ton email (optionnel)",
            Self::SenderPhone => "Ton WhatsApp (optionnel)",
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::SenderName => "Jean",
            Self::ReceiverName => "Marie",
            Self::SenderEmail => "jean@mail.com",
            Self::SenderPhone => "6XX XX XX XX",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::SenderName => 0,
            Self::ReceiverName => 1,
            Self::SenderEmail => 2,
            Self::SenderPhone => 3,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Single-line text input. The cursor counts graphemes, not bytes.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(1));
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, new_char: char) {
        if new_char.is_control()
            || self.grapheme_count() >= MAX_FIELD_LEN
            || self.text.len() + new_char.len_utf8() > MAX_FIELD_BYTES
        {
            return;
        }
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    /// Insert pasted text, dropping line breaks and anything past the length cap.
    pub fn enter_text(&mut self, text: &str) {
        let room = MAX_FIELD_LEN.saturating_sub(self.grapheme_count());
        let mut byte_room = MAX_FIELD_BYTES.saturating_sub(self.text.len());
        let cleaned: String = text
            .graphemes(true)
            .filter(|grapheme| !grapheme.chars().any(char::is_control))
            .take(room)
            .take_while(|grapheme| {
                let fits = grapheme.len() <= byte_room;
                byte_room = byte_room.saturating_sub(grapheme.len());
                fits
            })
            .collect();
        if cleaned.is_empty() {
            return;
        }
        let index = self.byte_index();
        self.text.insert_str(index, &cleaned);
        let inserted = cleaned.graphemes(true).count();
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(inserted));
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, cursor: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(cursor)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn clamp_cursor(&self, cursor: usize) -> usize {
        cursor.min(self.grapheme_count())
    }
}

#[derive(Debug, Default, Clone)]
pub struct SetupForm {
    fields: [TextField; 4],
    focus: FormField,
}

impl SetupForm {
    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    #[must_use]
    pub fn field(&self, field: FormField) -> &TextField {
        &self.fields[field.index()]
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut TextField {
        &mut self.fields[field.index()]
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        self.field_mut(self.focus)
    }

    /// Copy the field values into the flow's draft.
    pub fn fill(&self, draft: &mut ProposalDraft) {
        draft.sender_name = self.field(FormField::SenderName).text().to_string();
        draft.receiver_name = self.field(FormField::ReceiverName).text().to_string();
        draft.sender_email = self.field(FormField::SenderEmail).text().trim().to_string();
        draft.sender_phone = self.field(FormField::SenderPhone).text().trim().to_string();
    }
}
