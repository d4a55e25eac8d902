//! Settings validation

use super::Settings;

/// Settings validator
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings values
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(settings: &Settings) -> Result<(), String> {
        for dir in &settings.src_dirs {
            if dir.as_os_str().is_empty() {
                return Err("Source directory cannot be empty".to_string());
            }
        }

        if settings
            .out_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            return Err("Output directory cannot be empty".to_string());
        }

        Self::validate_extensions(&settings.svelte_extensions)?;

        for pattern in &settings.exclude {
            if pattern.trim().is_empty() {
                return Err("Exclude pattern cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Validate a dialect extension list
    ///
    /// # Errors
    ///
    /// Returns a description of the first empty or dot-less extension.
    pub fn validate_extensions(extensions: &[String]) -> Result<(), String> {
        for ext in extensions {
            if ext.is_empty() {
                return Err("Extension cannot be empty".to_string());
            }
            if !ext.starts_with('.') || ext.len() == 1 {
                return Err(format!("Extension '{ext}' must start with '.' followed by a name"));
            }
        }
        Ok(())
    }
}
