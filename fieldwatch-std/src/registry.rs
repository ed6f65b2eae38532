//! Handler map keyed by field name.

use fieldwatch_core::{Document, DynFieldHandler, FieldHandler, RegistrationError, Snapshot};
use std::{collections::HashMap, sync::Arc};

/// A shared, type-erased field handler.
pub type SharedHandler<S> = Arc<dyn DynFieldHandler<S>>;

/// A mapping from field name to an optional handler.
///
/// A field missing from the map and a field registered with an empty slot
/// are both skipped during dispatch. Iteration order is unspecified.
pub struct FieldHandlers<S: Snapshot> {
    slots: HashMap<String, Option<SharedHandler<S>>>,
}

impl<S: Snapshot> FieldHandlers<S> {
    /// Start building a handler map.
    pub fn builder() -> FieldHandlersBuilder<S> {
        FieldHandlersBuilder::new()
    }

    /// Start building a handler map restricted to the fields of `D`.
    pub fn for_document<D: Document>() -> FieldHandlersBuilder<S> {
        FieldHandlersBuilder::for_document::<D>()
    }

    /// Number of registered slots, empty ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The handler registered for `field`, if the slot is filled.
    pub fn get(&self, field: &str) -> Option<&SharedHandler<S>> {
        self.slots.get(field)?.as_ref()
    }

    /// Whether a handler is registered for `field`.
    pub fn handles(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterate over every slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&SharedHandler<S>>)> {
        self.slots
            .iter()
            .map(|(field, slot)| (field.as_str(), slot.as_ref()))
    }
}

impl<S: Snapshot> Default for FieldHandlers<S> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<S: Snapshot> Clone for FieldHandlers<S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<S: Snapshot> std::fmt::Debug for FieldHandlers<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (field, slot) in self.iter() {
            map.entry(&field, &slot.is_some());
        }
        map.finish()
    }
}

/// Builder for constructing [`FieldHandlers`].
///
/// Registration errors are collected and reported by [`build`](Self::build),
/// so registrations chain without intermediate `?`.
pub struct FieldHandlersBuilder<S: Snapshot> {
    slots: HashMap<String, Option<SharedHandler<S>>>,
    document: Option<(&'static str, &'static [&'static str])>,
    error: Option<RegistrationError>,
}

impl<S: Snapshot> Default for FieldHandlersBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Snapshot> FieldHandlersBuilder<S> {
    /// Create a new empty builder accepting any field name.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            document: None,
            error: None,
        }
    }

    /// Create a builder that rejects fields `D` does not declare.
    pub fn for_document<D: Document>() -> Self {
        Self {
            document: Some((D::NAME, D::FIELDS)),
            ..Self::new()
        }
    }

    /// Register a handler for `field`.
    pub fn on<H: FieldHandler<S>>(self, field: impl Into<String>, handler: H) -> Self {
        self.insert(field.into(), Some(Arc::new(handler)))
    }

    /// Register an already shared handler for `field`.
    pub fn on_shared(self, field: impl Into<String>, handler: SharedHandler<S>) -> Self {
        self.insert(field.into(), Some(handler))
    }

    /// Register a handler slot that may be empty.
    pub fn on_optional<H: FieldHandler<S>>(
        self,
        field: impl Into<String>,
        handler: Option<H>,
    ) -> Self {
        let slot = handler.map(|h| Arc::new(h) as SharedHandler<S>);
        self.insert(field.into(), slot)
    }

    /// Register an empty slot for `field`.
    pub fn skip(self, field: impl Into<String>) -> Self {
        self.insert(field.into(), None)
    }

    fn insert(mut self, field: String, slot: Option<SharedHandler<S>>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Some((document, fields)) = self.document {
            if !fields.contains(&field.as_str()) {
                self.error = Some(RegistrationError::UnknownField { field, document });
                return self;
            }
        }
        if self.slots.contains_key(&field) {
            self.error = Some(RegistrationError::DuplicateField(field));
            return self;
        }
        self.slots.insert(field, slot);
        self
    }

    /// Build the handler map, reporting the first registration error.
    pub fn build(self) -> Result<FieldHandlers<S>, RegistrationError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(FieldHandlers { slots: self.slots }),
        }
    }
}
