//! Loading indicators scoped to a field's status element.

/// A collaborator that shows and hides loading indicators.
pub trait LoadingIndicator {
    /// Shows a loading indicator in the element.
    fn make_indicator(&self, element: &str);

    /// Removes the loading indicator from the element.
    fn destroy_indicator(&self, element: &str);
}

impl<L: LoadingIndicator + ?Sized> LoadingIndicator for &L {
    #[inline]
    fn make_indicator(&self, element: &str) {
        (**self).make_indicator(element);
    }

    #[inline]
    fn destroy_indicator(&self, element: &str) {
        (**self).destroy_indicator(element);
    }
}

/// A guard that keeps a loading indicator alive until it is dropped.
#[must_use = "the indicator is destroyed as soon as the guard is dropped"]
pub struct IndicatorGuard<'a, L: LoadingIndicator + ?Sized> {
    /// Indicator collaborator.
    indicator: &'a L,
    /// Status element.
    element: String,
}

impl<'a, L: LoadingIndicator + ?Sized> IndicatorGuard<'a, L> {
    /// Shows the indicator in the element and returns a guard for it.
    pub fn acquire(indicator: &'a L, element: impl Into<String>) -> Self {
        let element = element.into();
        indicator.make_indicator(&element);
        Self { indicator, element }
    }

    /// Returns the status element.
    #[inline]
    pub fn element(&self) -> &str {
        &self.element
    }
}

impl<L: LoadingIndicator + ?Sized> Drop for IndicatorGuard<'_, L> {
    fn drop(&mut self) {
        self.indicator.destroy_indicator(&self.element);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{IndicatorGuard, LoadingIndicator};
    use std::cell::RefCell;

    /// Records indicator calls as `make:{element}` and `destroy:{element}`.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingIndicator {
        pub(crate) calls: RefCell<Vec<String>>,
    }

    impl LoadingIndicator for RecordingIndicator {
        fn make_indicator(&self, element: &str) {
            self.calls.borrow_mut().push(format!("make:{element}"));
        }

        fn destroy_indicator(&self, element: &str) {
            self.calls.borrow_mut().push(format!("destroy:{element}"));
        }
    }

    #[test]
    fn it_destroys_indicator_on_drop() {
        let indicator = RecordingIndicator::default();
        {
            let guard = IndicatorGuard::acquire(&indicator, "#custom-field-status-5");
            assert_eq!(guard.element(), "#custom-field-status-5");
            assert_eq!(indicator.calls.borrow().len(), 1);
        }
        assert_eq!(
            *indicator.calls.borrow(),
            ["make:#custom-field-status-5", "destroy:#custom-field-status-5"]
        );
    }
}
