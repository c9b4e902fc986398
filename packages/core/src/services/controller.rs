//! Edit Controller
//!
//! Single entry point for inline-edit synchronization on one page. The
//! controller owns the surface model and routes projection-layer input
//! events through three sub-protocols sharing one outbound channel:
//!
//! - **Dropdown sync**: a selection change is dispatched immediately, with
//!   no change suppression and no prior-value tracking.
//! - **Inline text editing**: a click starts an in-place editing session,
//!   blur or Enter commits it, and an update is dispatched only when the
//!   committed value differs from the captured one.
//! - **Back-flush navigation**: a back-button click enumerates every select
//!   widget in surface order, dispatches its current value, then navigates
//!   without waiting for any delivery.
//!
//! Controller methods are synchronous; the only asynchrony lives inside the
//! detached delivery tasks. Handling an event returns the view effects the
//! projection must apply (focus placement, default suppression).
//!
//! # Commit semantics
//!
//! Change suppression compares the trimmed committed text against the
//! untrimmed text captured at session start, with strict string inequality.
//! The display keeps the text exactly as typed; only the dispatched value is
//! trimmed. Ending a session is a one-shot transition, so blur and Enter
//! within one session produce at most one dispatch between them.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::{EditIntent, Surface, Widget};
use crate::services::dispatcher::{DispatchMetrics, UpdateDispatcher};
use crate::services::events::{EditEvent, EDIT_EVENT_CHANNEL_CAPACITY};
use crate::services::transport::UpdateTransport;

/// Navigation seam toward the host page's browsing history.
///
/// The controller calls `back` synchronously after issuing flush requests.
/// Implementations must not block on those requests; the flush is
/// at-most-effort by design and navigation may well destroy the page before
/// deliveries land.
pub trait History: Send + Sync {
    /// Navigate the given number of steps back through history.
    fn back(&self, steps: u32);
}

/// Input events relayed by the projection layer.
///
/// `target` is always a widget id; events targeting unknown widgets are
/// ignored. The projection relays the editable's current text through
/// `Input` while a session is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer activation of a widget
    Click { target: String },

    /// A dropdown's selection changed to `value`
    Change { target: String, value: String },

    /// The text of an active editing session changed
    Input { target: String, text: String },

    /// An editing widget lost focus
    Blur { target: String },

    /// Enter was pressed inside an editing widget
    Enter { target: String },
}

/// View effects the projection applies after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Suppress the browser's default reaction to the triggering event
    PreventDefault,

    /// Place focus in the widget and select its entire content
    FocusAndSelectAll { target: String },

    /// Drop focus from the widget
    ReleaseFocus { target: String },
}

/// Page-scoped controller tying the surface to the update endpoint.
pub struct EditController {
    surface: Surface,
    dispatcher: UpdateDispatcher,
    history: Arc<dyn History>,
    events: broadcast::Sender<EditEvent>,
}

impl EditController {
    /// Create a controller for one page.
    ///
    /// # Arguments
    ///
    /// * `surface` - Widget records for the rendered page, in page order
    /// * `transport` - Delivery channel for field updates
    /// * `history` - Navigation seam used by the back-flush
    pub fn new(
        surface: Surface,
        transport: Arc<dyn UpdateTransport>,
        history: Arc<dyn History>,
    ) -> Self {
        let (events, _) = broadcast::channel(EDIT_EVENT_CHANNEL_CAPACITY);
        Self {
            surface,
            dispatcher: UpdateDispatcher::new(transport),
            history,
            events,
        }
    }

    /// The current surface model.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access for page re-renders.
    ///
    /// The flush always reads live values through the surface, so swapping
    /// widget records here keeps the protocol contracts intact.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Subscribe to edit lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditEvent> {
        self.events.subscribe()
    }

    /// Shared handle to the dispatch counters.
    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        self.dispatcher.metrics()
    }

    /// Route one input event and return the effects to apply.
    ///
    /// Must be called from within a Tokio runtime: committed edits are
    /// dispatched as detached delivery tasks.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        match event {
            InputEvent::Click { target } => self.on_click(&target),
            InputEvent::Change { target, value } => self.on_change(&target, value),
            InputEvent::Input { target, text } => self.on_input(&target, text),
            InputEvent::Blur { target } => self.on_blur(&target),
            InputEvent::Enter { target } => self.on_enter(&target),
        }
    }

    fn on_click(&mut self, target: &str) -> Vec<Effect> {
        match self.surface.widget(target) {
            Some(Widget::Back(_)) => self.flush_and_navigate(target),
            Some(Widget::Text(_)) => self.begin_text_edit(target),
            _ => Vec::new(),
        }
    }

    /// Dropdown sync: store the value, dispatch if the widget has identity.
    ///
    /// One dispatch per change event, even when the value did not actually
    /// change; the native control already reflects the selection, so no
    /// effects are returned.
    fn on_change(&mut self, target: &str, value: String) -> Vec<Effect> {
        let Some(select) = self.surface.select_mut(target) else {
            return Vec::new();
        };
        select.value = value;

        let binding = select.binding.clone();
        let current = select.value.clone();
        match binding.resolve() {
            Some(field) => {
                self.dispatcher
                    .dispatch(EditIntent::new(field.clone(), None, current.clone()));
                let _ = self.events.send(EditEvent::SelectionCommitted {
                    field,
                    value: current,
                });
            }
            None => {
                tracing::debug!("selection on '{}' has no identity, kept local", target);
            }
        }
        Vec::new()
    }

    fn begin_text_edit(&mut self, target: &str) -> Vec<Effect> {
        let Some(text) = self.surface.text_mut(target) else {
            return Vec::new();
        };
        if !text.begin_edit() {
            // Click landed on a widget already mid-edit.
            return Vec::new();
        }
        vec![Effect::FocusAndSelectAll {
            target: target.to_string(),
        }]
    }

    fn on_input(&mut self, target: &str, text: String) -> Vec<Effect> {
        if let Some(widget) = self.surface.text_mut(target) {
            if !widget.set_buffer(text) {
                tracing::debug!("input for '{}' ignored, no active edit session", target);
            }
        }
        Vec::new()
    }

    fn on_blur(&mut self, target: &str) -> Vec<Effect> {
        self.commit_text(target);
        Vec::new()
    }

    /// Enter commits like blur, and additionally asks the projection to
    /// suppress form submission and drop focus. The follow-up blur event
    /// then finds the session already consumed.
    fn on_enter(&mut self, target: &str) -> Vec<Effect> {
        if self.commit_text(target) {
            vec![
                Effect::PreventDefault,
                Effect::ReleaseFocus {
                    target: target.to_string(),
                },
            ]
        } else {
            Vec::new()
        }
    }

    /// End an editing session. Returns whether a session was consumed.
    ///
    /// Dispatches only when the trimmed committed text differs from the
    /// untrimmed captured text and the widget has a full identity.
    fn commit_text(&mut self, target: &str) -> bool {
        let Some(widget) = self.surface.text_mut(target) else {
            return false;
        };
        let Some(session) = widget.take_session() else {
            return false;
        };

        let (old_value, buffer) = session.into_parts();
        let new_value = buffer.trim().to_string();

        // Display keeps the text exactly as typed; only the sent value is
        // trimmed.
        widget.value = buffer;

        let binding = widget.binding.clone();
        let widget_id = widget.id.clone();

        if new_value != old_value {
            if let Some(field) = binding.resolve() {
                self.dispatcher.dispatch(EditIntent::new(
                    field.clone(),
                    Some(old_value.clone()),
                    new_value.clone(),
                ));
                let _ = self.events.send(EditEvent::TextCommitted {
                    field,
                    old_value,
                    new_value,
                });
                return true;
            }
            tracing::debug!("edit on '{}' has no identity, kept local", widget_id);
        }

        let _ = self.events.send(EditEvent::EditSuppressed { widget_id });
        true
    }

    /// Back-flush: dispatch every identified select's current value, then
    /// navigate. Deliveries are not awaited; navigating before they land is
    /// an accepted race, not a bug.
    fn flush_and_navigate(&mut self, target: &str) -> Vec<Effect> {
        let steps = self
            .surface
            .back_button(target)
            .map(|back| back.step_count())
            .unwrap_or(1);

        let mut requests = 0usize;
        for select in self.surface.selects() {
            match select.binding.resolve() {
                Some(field) => {
                    self.dispatcher
                        .dispatch(EditIntent::new(field, None, select.value.clone()));
                    requests += 1;
                }
                None => {
                    tracing::debug!("flush skipping '{}', no identity", select.id);
                }
            }
        }

        let _ = self.events.send(EditEvent::FlushDispatched { requests, steps });
        self.history.back(steps);

        vec![Effect::PreventDefault]
    }
}
