use std::sync::Arc;

use paramstate_tensor::{NativeTensor, TensorValue};

use crate::{ModelError, ModelState};

/// A named, versioned model and its weights.
///
/// The record keeps two states: the *start state*, exactly as loaded, and the *current state*,
/// updated after every training step. The start state is kept as a fixed reference point so the
/// caller can compare it against the current weights later on.
///
/// Right after [`load_model_state`](ModelRecord::load_model_state) both states are the same
/// shared snapshot. The first [`update_model`](ModelRecord::update_model) copies it before
/// writing, so the start state never changes.
#[derive(Debug, Clone)]
pub struct ModelRecord {
    model_name: String,
    version: Option<String>,
    registry_id: Option<String>,
    current_state: Option<Arc<ModelState>>,
    start_state: Option<Arc<ModelState>>,
}

impl ModelRecord {
    /// Creates a record with no state loaded.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyModelName`] when `model_name` is empty. The name is not
    /// otherwise validated.
    pub fn new(model_name: impl Into<String>) -> Result<Self, ModelError> {
        let model_name = model_name.into();

        if model_name.is_empty() {
            return Err(ModelError::EmptyModelName);
        }

        Ok(Self {
            model_name,
            version: None,
            registry_id: None,
            current_state: None,
            start_state: None,
        })
    }

    /// Sets the model version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the id assigned to the model by the hosting registry.
    pub fn with_registry_id(mut self, registry_id: impl Into<String>) -> Self {
        self.registry_id = Some(registry_id.into());
        self
    }

    /// The model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The model version, if known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The registry id, if assigned.
    pub fn registry_id(&self) -> Option<&str> {
        self.registry_id.as_deref()
    }

    /// Assigns the registry id, typically once the model has been fetched from the registry.
    pub fn set_registry_id(&mut self, registry_id: impl Into<String>) {
        self.registry_id = Some(registry_id.into());
    }

    /// The state as currently updated.
    pub fn current_state(&self) -> Option<&ModelState> {
        self.current_state.as_deref()
    }

    /// The state as initially loaded.
    pub fn start_state(&self) -> Option<&ModelState> {
        self.start_state.as_deref()
    }

    /// Returns true once a current state is present.
    pub fn is_loaded(&self) -> bool {
        self.current_state.is_some()
    }

    /// Assigns the current state without touching the start state.
    pub fn set_current_state(&mut self, state: ModelState) {
        self.current_state = Some(Arc::new(state));
    }

    /// Decodes `bytes` and makes the result both the start and the current state.
    ///
    /// On failure the existing states are left untouched.
    pub fn load_model_state(&mut self, bytes: &[u8]) -> Result<(), ModelError> {
        let state = Arc::new(ModelState::decode(bytes)?);

        log::debug!(
            "Loaded {} tensors ({} parameters) for model {}",
            state.len(),
            state.num_params(),
            self.model_name
        );

        self.current_state = Some(state.clone());
        self.start_state = Some(state);

        Ok(())
    }

    /// Overwrites the current state with freshly computed parameters, by position.
    ///
    /// Only the first `min(params.len(), state.len())` positions are replaced: extra parameters
    /// are ignored and trailing tensors are kept. All parameters are converted before the first
    /// replacement, so a conversion error leaves the current state unchanged. The start state is
    /// never modified.
    ///
    /// Returns the number of replaced positions, `0` when no state has been loaded yet.
    pub fn update_model<T: NativeTensor>(&mut self, params: &[T]) -> Result<usize, ModelError> {
        let Some(current) = self.current_state.as_mut() else {
            log::trace!(
                "Model {} has no state loaded, ignoring update",
                self.model_name
            );
            return Ok(0);
        };

        if params.len() != current.len() {
            log::warn!(
                "Model {} received {} parameters for a state of {} tensors",
                self.model_name,
                params.len(),
                current.len()
            );
        }

        let values = params
            .iter()
            .take(current.len())
            .map(TensorValue::from_native)
            .collect::<Result<Vec<_>, _>>()?;

        let state = Arc::make_mut(current);
        let updated = values.len();
        for (position, value) in values.into_iter().enumerate() {
            state.replace_at(position, value)?;
        }

        log::trace!("Updated {updated} tensors of model {}", self.model_name);

        Ok(updated)
    }
}
