use super::{PickerEvent, PickerEventKind};

/// An event handler for a widget of type `W`.
type Handler<W> = Box<dyn FnMut(&PickerEvent<'_>, &mut W)>;

/// A typed emitter of date picker events.
///
/// Handlers are invoked synchronously in registration order.
pub struct PickerEvents<W: ?Sized> {
    /// Registered handlers.
    handlers: Vec<(PickerEventKind, Handler<W>)>,
}

impl<W: ?Sized> PickerEvents<W> {
    /// Creates a new instance without handlers.
    #[inline]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registers a handler for the event kind.
    pub fn on<F>(&mut self, kind: PickerEventKind, handler: F) -> &mut Self
    where
        F: FnMut(&PickerEvent<'_>, &mut W) + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
        self
    }

    /// Registers a handler for the [`Ready`](PickerEventKind::Ready) event.
    #[inline]
    pub fn on_ready<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&PickerEvent<'_>, &mut W) + 'static,
    {
        self.on(PickerEventKind::Ready, handler)
    }

    /// Registers a handler for the [`Change`](PickerEventKind::Change) event.
    #[inline]
    pub fn on_change<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&PickerEvent<'_>, &mut W) + 'static,
    {
        self.on(PickerEventKind::Change, handler)
    }

    /// Registers a handler for the [`Close`](PickerEventKind::Close) event.
    #[inline]
    pub fn on_close<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&PickerEvent<'_>, &mut W) + 'static,
    {
        self.on(PickerEventKind::Close, handler)
    }

    /// Returns the number of handlers registered for the event kind.
    pub fn handler_count(&self, kind: PickerEventKind) -> usize {
        self.handlers.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Delivers the event to its handlers and returns how many were invoked.
    pub fn emit(&mut self, event: &PickerEvent<'_>, widget: &mut W) -> usize {
        let kind = event.kind();
        let mut invoked = 0;
        for (_, handler) in self.handlers.iter_mut().filter(|(k, _)| *k == kind) {
            handler(event, &mut *widget);
            invoked += 1;
        }
        if invoked == 0 {
            tracing::trace!(event = kind.as_str(), "no handlers registered");
        }
        invoked
    }
}

impl<W: ?Sized> Default for PickerEvents<W> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
