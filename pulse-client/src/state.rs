/// Who owns a piece of UI state
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    /// The host owns the value and pushes updates with `sync`
    Controlled,
    /// The engine owns the value and applies requests itself
    Uncontrolled,
}

/// A value that is either owned by the host or by the engine. The source is
/// fixed at construction and never changes afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Controllable<T> {
    source: Source,
    value: T,
}

impl<T: PartialEq> Controllable<T> {
    pub fn controlled(value: T) -> Controllable<T> {
        Controllable {
            source: Source::Controlled,
            value,
        }
    }

    pub fn uncontrolled(value: T) -> Controllable<T> {
        Controllable {
            source: Source::Uncontrolled,
            value,
        }
    }

    pub fn new(source: Source, value: T) -> Controllable<T> {
        Controllable { source, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// A change requested from the UI. Only uncontrolled values change here.
    /// Returns whether the stored value changed.
    pub fn request(&mut self, value: T) -> bool {
        match self.source {
            Source::Controlled => false,
            Source::Uncontrolled => self.replace(value),
        }
    }

    /// A value pushed by the host. Only controlled values change here.
    /// Returns whether the stored value changed.
    pub fn sync(&mut self, value: T) -> bool {
        match self.source {
            Source::Controlled => self.replace(value),
            Source::Uncontrolled => {
                tracing::warn!("ignoring host update of an uncontrolled value");
                false
            }
        }
    }

    fn replace(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}
