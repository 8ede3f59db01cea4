use super::{DatePicker, PickerEvent, PickerEvents};
use crate::Date;
use std::{cell::RefCell, rc::Rc};

/// Phase of a date field's input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePhase {
    /// No valid date has been accepted yet.
    Empty,
    /// A valid date has been accepted.
    HasValidDate,
}

/// Transient validation state of one date field.
///
/// The last valid date is only ever replaced by a newer accepted date,
/// never by rejected input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DateFieldState {
    /// Last date accepted by the widget.
    last_valid_date: Option<Date>,
    /// Whether the last close restored the value with a change event.
    pending_trigger_change: bool,
}

impl DateFieldState {
    /// Returns the last valid date.
    #[inline]
    pub fn last_valid_date(&self) -> Option<Date> {
        self.last_valid_date
    }

    /// Returns `true` if the last close restored the value with a change event.
    #[inline]
    pub fn pending_trigger_change(&self) -> bool {
        self.pending_trigger_change
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> DatePhase {
        if self.last_valid_date.is_some() {
            DatePhase::HasValidDate
        } else {
            DatePhase::Empty
        }
    }

    fn remember(&mut self, date: Date) {
        self.last_valid_date = Some(date);
        self.pending_trigger_change = false;
    }
}

/// Keeps a date picker's committed value consistent with the last valid date.
#[derive(Debug, Clone)]
pub struct DateInputController {
    /// ID of the profile field.
    field_id: i64,
    /// Validation state.
    state: DateFieldState,
}

impl DateInputController {
    /// Creates a new instance for the field.
    #[inline]
    pub fn new(field_id: i64) -> Self {
        Self {
            field_id,
            state: DateFieldState::default(),
        }
    }

    /// Returns the field ID.
    #[inline]
    pub fn field_id(&self) -> i64 {
        self.field_id
    }

    /// Returns a reference to the validation state.
    #[inline]
    pub fn state(&self) -> &DateFieldState {
        &self.state
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> DatePhase {
        self.state.phase()
    }

    /// Returns the last valid date.
    #[inline]
    pub fn last_valid_date(&self) -> Option<Date> {
        self.state.last_valid_date()
    }

    /// Seeds the state with the field's initial value.
    #[inline]
    pub fn on_ready<W: DatePicker + ?Sized>(
        &mut self,
        dates: &[Date],
        formatted_text: &str,
        widget: &W,
    ) {
        self.on_value_accepted(dates, formatted_text, widget);
    }

    /// Records the date accepted by the widget's own parser.
    ///
    /// An empty `dates` leaves the state untouched even if the text is not empty.
    pub fn on_value_accepted<W: DatePicker + ?Sized>(
        &mut self,
        dates: &[Date],
        formatted_text: &str,
        widget: &W,
    ) {
        let field_id = self.field_id;
        if let Some(&date) = dates.first() {
            self.state.remember(date);
            tracing::debug!(field_id, date = %widget.format_date(date), "date accepted");
        } else if !formatted_text.is_empty() {
            tracing::debug!(field_id, formatted_text, "no date accepted");
        }
    }

    /// Validates the text when the widget closes, restoring the last valid
    /// date if the text cannot be parsed.
    pub fn on_close<W: DatePicker + ?Sized>(
        &mut self,
        _dates: &[Date],
        formatted_text: &str,
        widget: &mut W,
    ) {
        if widget.parse_date(formatted_text).is_some() {
            return;
        }

        let field_id = self.field_id;
        match self.state.last_valid_date {
            Some(date) => {
                widget.set_date(date, true);
                self.state.pending_trigger_change = true;
                tracing::debug!(
                    field_id,
                    formatted_text,
                    restored = %widget.format_date(date),
                    "invalid date rejected"
                );
            }
            None => {
                tracing::debug!(field_id, formatted_text, "invalid date rejected without restoration");
            }
        }
    }

    /// Clears the widget for the "remove date" control.
    ///
    /// The last valid date is kept so that later invalid input still snaps back to it.
    pub fn on_remove_date<W: DatePicker + ?Sized>(&mut self, widget: &mut W) {
        widget.clear();
        self.state.pending_trigger_change = false;
        tracing::debug!(field_id = self.field_id, "date removed");
    }

    /// Registers the controller's handlers on the widget's events and
    /// returns the shared controller.
    pub fn bind<W: DatePicker + 'static>(self, events: &mut PickerEvents<W>) -> Rc<RefCell<Self>> {
        let controller = Rc::new(RefCell::new(self));
        let on_ready = controller.clone();
        let on_change = controller.clone();
        let on_close = controller.clone();
        events
            .on_ready(move |event: &PickerEvent<'_>, widget: &mut W| {
                on_ready.borrow_mut().on_ready(
                    event.selected_dates(),
                    event.formatted_text(),
                    &*widget,
                );
            })
            .on_change(move |event: &PickerEvent<'_>, widget: &mut W| {
                on_change.borrow_mut().on_value_accepted(
                    event.selected_dates(),
                    event.formatted_text(),
                    &*widget,
                );
            })
            .on_close(move |event: &PickerEvent<'_>, widget: &mut W| {
                on_close.borrow_mut().on_close(
                    event.selected_dates(),
                    event.formatted_text(),
                    widget,
                );
            });
        controller
    }
}
