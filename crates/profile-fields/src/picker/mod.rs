//! Date picker collaborators and the input controller.

use crate::{Date, DateFormat};
use profile_fields_core::extension::TomlTableExt;
use std::fmt;
use toml::Table;

mod controller;
mod event;

pub use controller::{DateFieldState, DateInputController, DatePhase};
pub use event::PickerEvents;

/// Returns the picker date format in the `[profile-fields]` table of the config,
/// or the canonical `Y-m-d` format.
pub fn date_format_from_config(config: &Table) -> DateFormat {
    config
        .get_table("profile-fields")
        .and_then(|config| config.get_str("date-format"))
        .map(|format| DateFormat::new(format.to_owned()))
        .unwrap_or_default()
}

/// A handle to a date picker widget.
pub trait DatePicker {
    /// Returns the configured date format.
    fn date_format(&self) -> &DateFormat;

    /// Commits the date to the widget.
    ///
    /// With `trigger_change`, the assignment is reported to change listeners
    /// as a genuine value change.
    fn set_date(&mut self, date: Date, trigger_change: bool);

    /// Clears the committed value.
    fn clear(&mut self);

    /// Parses the text with the configured date format.
    #[inline]
    fn parse_date(&self, text: &str) -> Option<Date> {
        self.date_format().parse(text).ok()
    }

    /// Formats the date with the configured date format.
    #[inline]
    fn format_date(&self, date: Date) -> String {
        self.date_format().format(date)
    }
}

/// Lifecycle events emitted by a date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerEventKind {
    /// The widget is initialized with the field's value.
    Ready,
    /// The widget accepted a value.
    Change,
    /// The widget lost focus or closed.
    Close,
}

impl PickerEventKind {
    /// Returns `self` as `&'static str`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Change => "change",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for PickerEventKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by a date picker.
#[derive(Debug, Clone, Copy)]
pub struct PickerEvent<'a> {
    /// Event kind.
    kind: PickerEventKind,
    /// Dates parsed by the widget itself, which may be empty.
    selected_dates: &'a [Date],
    /// Raw display text.
    formatted_text: &'a str,
}

impl<'a> PickerEvent<'a> {
    /// Creates a new instance.
    #[inline]
    pub fn new(kind: PickerEventKind, selected_dates: &'a [Date], formatted_text: &'a str) -> Self {
        Self {
            kind,
            selected_dates,
            formatted_text,
        }
    }

    /// Returns the event kind.
    #[inline]
    pub fn kind(&self) -> PickerEventKind {
        self.kind
    }

    /// Returns the dates parsed by the widget.
    #[inline]
    pub fn selected_dates(&self) -> &'a [Date] {
        self.selected_dates
    }

    /// Returns the raw display text.
    #[inline]
    pub fn formatted_text(&self) -> &'a str {
        self.formatted_text
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{DatePicker, date_format_from_config};
    use crate::{Date, DateFormat};
    use toml::Table;

    /// A widget double recording the committed value.
    #[derive(Debug, Default)]
    pub(crate) struct MockPicker {
        pub(crate) format: DateFormat,
        pub(crate) last_set_date: Option<Date>,
        pub(crate) trigger_change: Option<bool>,
        pub(crate) set_date_calls: usize,
        pub(crate) was_cleared: bool,
    }

    impl DatePicker for MockPicker {
        fn date_format(&self) -> &DateFormat {
            &self.format
        }

        fn set_date(&mut self, date: Date, trigger_change: bool) {
            self.last_set_date = Some(date);
            self.trigger_change = Some(trigger_change);
            self.set_date_calls += 1;
        }

        fn clear(&mut self) {
            self.last_set_date = None;
            self.was_cleared = true;
        }
    }

    #[test]
    fn it_parses_with_widget_format() {
        let picker = MockPicker {
            format: DateFormat::new("d/m/Y"),
            ..MockPicker::default()
        };
        let date = Date::try_new(2023, 5, 15).unwrap();
        assert_eq!(picker.parse_date("15/05/2023"), Some(date));
        assert_eq!(picker.parse_date("2023-05-15"), None);
        assert_eq!(picker.format_date(date), "15/05/2023");
    }

    #[test]
    fn it_reads_date_format_config() {
        let config: Table = "[profile-fields]\ndate-format = \"d/m/Y\"\n".parse().unwrap();
        assert_eq!(date_format_from_config(&config).strftime(), "%d/%m/%Y");
        assert_eq!(date_format_from_config(&Table::new()), DateFormat::canonical());
    }
}
