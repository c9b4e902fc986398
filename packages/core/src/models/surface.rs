//! Surface Model
//!
//! An explicit, ordered collection of widget state records standing in for
//! the rendered page. The visual layer is a pure projection of this model:
//! every editable element on the page maps to exactly one widget record
//! carrying its own identity, and the controller mutates these records in
//! response to projection events.
//!
//! Three widget kinds mirror the page contract:
//!
//! - [`SelectWidget`]: a dropdown whose selection persists immediately
//! - [`TextWidget`]: display text that can enter an in-place editing session
//! - [`BackButton`]: a history control that flushes dropdown values first
//!
//! Surface order is significant: the back-flush walks select widgets in the
//! order they were pushed, matching the order they appear on the page.

use crate::models::field::Binding;

/// Per-widget editing state for an active in-place text edit.
///
/// `old_value` is captured untrimmed when the session begins and is the
/// reference for change suppression at commit. The buffer tracks the text as
/// the user types; the projection relays it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    old_value: String,
    buffer: String,
}

impl EditSession {
    pub(crate) fn begin(current: &str) -> Self {
        Self {
            old_value: current.to_string(),
            buffer: current.to_string(),
        }
    }

    /// The displayed text at session start, untrimmed.
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// The text as currently typed.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn set_buffer(&mut self, text: String) {
        self.buffer = text;
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.old_value, self.buffer)
    }
}

/// A dropdown widget. The native control already reflects the selection, so
/// the model only tracks the current value and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectWidget {
    /// Widget identifier, unique within the surface
    pub id: String,

    /// Identity attributes tying the widget to a persisted field
    pub binding: Binding,

    /// Currently selected value
    pub value: String,
}

impl SelectWidget {
    pub fn new(id: impl Into<String>, binding: Binding, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            binding,
            value: value.into(),
        }
    }
}

/// An editable text widget with a two-state machine: display and editing.
///
/// The widget record survives the edit; entering and leaving an editing
/// session never destroys or recreates it, so identity attributes are
/// trivially stable across a commit cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWidget {
    /// Widget identifier, unique within the surface
    pub id: String,

    /// Identity attributes tying the widget to a persisted field
    pub binding: Binding,

    /// Currently displayed text
    pub value: String,

    session: Option<EditSession>,
}

impl TextWidget {
    pub fn new(id: impl Into<String>, binding: Binding, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            binding,
            value: value.into(),
            session: None,
        }
    }

    /// Whether an editing session is active.
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Start an editing session, capturing the current text untrimmed.
    ///
    /// Returns `false` if a session is already active; re-activation mid-edit
    /// is a no-op.
    pub(crate) fn begin_edit(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(EditSession::begin(&self.value));
        true
    }

    /// Replace the session buffer with the text as currently typed.
    ///
    /// Returns `false` when no session is active.
    pub(crate) fn set_buffer(&mut self, text: String) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.set_buffer(text);
                true
            }
            None => false,
        }
    }

    /// Consume the active session. The one-shot commit guard: a second
    /// commit trigger within the same session finds nothing to take.
    pub(crate) fn take_session(&mut self) -> Option<EditSession> {
        self.session.take()
    }
}

/// A history control. `steps` holds the raw attribute value; parsing happens
/// on use so a malformed page attribute degrades to the default rather than
/// failing construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackButton {
    /// Widget identifier, unique within the surface
    pub id: String,

    /// Raw step-count attribute, if the page provided one
    pub steps: Option<String>,
}

impl BackButton {
    pub fn new(id: impl Into<String>, steps: Option<&str>) -> Self {
        Self {
            id: id.into(),
            steps: steps.map(str::to_string),
        }
    }

    /// Number of history steps to navigate back.
    ///
    /// Absent, non-numeric, or non-positive attributes all mean exactly 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldsync_core::models::BackButton;
    ///
    /// assert_eq!(BackButton::new("b", None).step_count(), 1);
    /// assert_eq!(BackButton::new("b", Some("abc")).step_count(), 1);
    /// assert_eq!(BackButton::new("b", Some("3")).step_count(), 3);
    /// ```
    pub fn step_count(&self) -> u32 {
        self.steps
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1)
    }
}

/// One widget record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Select(SelectWidget),
    Text(TextWidget),
    Back(BackButton),
}

impl Widget {
    /// Widget identifier, unique within the surface.
    pub fn id(&self) -> &str {
        match self {
            Widget::Select(select) => &select.id,
            Widget::Text(text) => &text.id,
            Widget::Back(back) => &back.id,
        }
    }
}

impl From<SelectWidget> for Widget {
    fn from(widget: SelectWidget) -> Self {
        Widget::Select(widget)
    }
}

impl From<TextWidget> for Widget {
    fn from(widget: TextWidget) -> Self {
        Widget::Text(widget)
    }
}

impl From<BackButton> for Widget {
    fn from(widget: BackButton) -> Self {
        Widget::Back(widget)
    }
}

/// The ordered widget collection for one page.
///
/// There is no registry beside this one: each widget record carries its own
/// identity, and lookups go by widget id. Order is preserved from insertion
/// and drives flush enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    widgets: Vec<Widget>,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget in page order.
    pub fn push(&mut self, widget: impl Into<Widget>) {
        self.widgets.push(widget.into());
    }

    /// Number of widgets on the surface.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the surface holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// All widgets in page order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    /// Look up any widget by id.
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// Look up a select widget by id.
    pub fn select(&self, id: &str) -> Option<&SelectWidget> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Select(select) if select.id == id => Some(select),
            _ => None,
        })
    }

    pub fn select_mut(&mut self, id: &str) -> Option<&mut SelectWidget> {
        self.widgets.iter_mut().find_map(|w| match w {
            Widget::Select(select) if select.id == id => Some(select),
            _ => None,
        })
    }

    /// Look up a text widget by id.
    pub fn text(&self, id: &str) -> Option<&TextWidget> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Text(text) if text.id == id => Some(text),
            _ => None,
        })
    }

    pub fn text_mut(&mut self, id: &str) -> Option<&mut TextWidget> {
        self.widgets.iter_mut().find_map(|w| match w {
            Widget::Text(text) if text.id == id => Some(text),
            _ => None,
        })
    }

    /// Look up a back button by id.
    pub fn back_button(&self, id: &str) -> Option<&BackButton> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Back(back) if back.id == id => Some(back),
            _ => None,
        })
    }

    /// All select widgets in page order. Flush enumeration reads live values
    /// through this iterator.
    pub fn selects(&self) -> impl Iterator<Item = &SelectWidget> {
        self.widgets.iter().filter_map(|w| match w {
            Widget::Select(select) => Some(select),
            _ => None,
        })
    }
}
