/// Media sources captured by an audio context, one per element.
///
/// An element can only be captured once per context, and after capture its
/// sound reaches the speakers only through the graph. Entries are therefore
/// never dropped; re-targeting only moves which entry feeds the analyser.
pub struct SourceCache<E, S> {
    entries: Vec<(E, S)>,
    active: Option<usize>,
}

/// Result of pointing the analyser at an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Already feeding the analyser; nothing to rewire.
    Unchanged,
    /// Connect `index` to the analyser, disconnecting `previous` first.
    Switched {
        index: usize,
        previous: Option<usize>,
    },
}

impl<E: PartialEq + Clone, S> Default for SourceCache<E, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            active: None,
        }
    }
}

impl<E: PartialEq + Clone, S> SourceCache<E, S> {
    pub fn position(&self, element: &E) -> Option<usize> {
        self.entries.iter().position(|(e, _)| e == element)
    }

    /// Index of the element's source, calling `create` only on first capture.
    pub fn capture<Err>(
        &mut self,
        element: &E,
        create: impl FnOnce(&E) -> Result<S, Err>,
    ) -> Result<usize, Err> {
        if let Some(i) = self.position(element) {
            return Ok(i);
        }
        let source = create(element)?;
        self.entries.push((element.clone(), source));
        Ok(self.entries.len() - 1)
    }

    pub fn activate(&mut self, index: usize) -> Activation {
        if self.active == Some(index) {
            return Activation::Unchanged;
        }
        let previous = self.active.replace(index);
        Activation::Switched { index, previous }
    }

    /// Stop feeding the analyser; returns the entry that was connected.
    pub fn deactivate(&mut self) -> Option<usize> {
        self.active.take()
    }

    pub fn source(&self, index: usize) -> Option<&S> {
        self.entries.get(index).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True once any element's output runs through the context.
    pub fn has_captured(&self) -> bool {
        !self.entries.is_empty()
    }
}
