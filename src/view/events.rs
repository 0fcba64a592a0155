// src/view/events.rs
// =============================================================================
// A tiny observer registry.
//
// Components publish typed events; anyone interested subscribes a closure.
// Everything runs on one thread, so observers are plain `FnMut` boxes.
// =============================================================================

pub struct Listeners<E> {
    observers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&E) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // Delivers `event` to every observer, in subscription order
    pub fn emit(&mut self, event: &E) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}
