use std::path::Path;

use crate::{ModelError, ModelRecord, ModelState};

impl ModelRecord {
    /// Reads a whole model state file and loads it with
    /// [`load_model_state`](ModelRecord::load_model_state).
    ///
    /// On failure the existing states are left untouched.
    pub fn load_model_state_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;

        self.load_model_state(&bytes)?;
        log::debug!("Model loaded from {}", path.display());

        Ok(())
    }
}

impl ModelState {
    /// Encodes the state and writes it to `path`, replacing any existing file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();

        if path.exists() {
            log::info!("File exists, replacing");
        }

        std::fs::write(path, self.encode()?)?;
        Ok(())
    }
}
