use crate::error::{AgenticError, Result};
use crate::ide::TargetIde;
use crate::io::atomic_write;
use crate::namespace::Namespace;
use crate::paths::{self, DEFAULT_OUTPUT_FOLDER};
use crate::template::TemplateOptions;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tool version recorded in every settings file.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

fn default_output_folder() -> String {
    DEFAULT_OUTPUT_FOLDER.to_string()
}

/// Contents of `.{ide}/.agentic.settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgenticSettings {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    #[serde(default)]
    pub high_thinking_model_name: String,
    #[serde(default)]
    pub code_writing_model_name: String,
    #[serde(default)]
    pub qa_model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<String>>,
    #[serde(default)]
    pub last_update: String,
}

impl AgenticSettings {
    /// Snapshot of `options` stamped with the current tool version and time.
    pub fn new(options: &TemplateOptions, workflows: Option<Vec<String>>) -> Self {
        Self {
            version: TOOL_VERSION.to_string(),
            namespace: options.namespace.clone(),
            output_folder: options.output_folder.clone(),
            high_thinking_model_name: options.high_thinking_model_name.clone(),
            code_writing_model_name: options.code_writing_model_name.clone(),
            qa_model_name: options.qa_model_name.clone(),
            workflows,
            last_update: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Template options recorded here. Blank model names fall back to the
    /// IDE defaults.
    pub fn template_options(&self, ide: TargetIde) -> TemplateOptions {
        let defaults = TemplateOptions::for_namespace(ide, self.namespace.clone());
        let pick = |stored: &str, fallback: String| {
            if stored.is_empty() {
                fallback
            } else {
                stored.to_string()
            }
        };
        TemplateOptions {
            namespace: self.namespace.clone(),
            output_folder: pick(&self.output_folder, defaults.output_folder),
            high_thinking_model_name: pick(
                &self.high_thinking_model_name,
                defaults.high_thinking_model_name,
            ),
            code_writing_model_name: pick(
                &self.code_writing_model_name,
                defaults.code_writing_model_name,
            ),
            qa_model_name: pick(&self.qa_model_name, defaults.qa_model_name),
        }
    }

    /// `YYYY-MM-DD` of the last write, when the timestamp parses.
    pub fn installed_date(&self) -> Option<String> {
        DateTime::parse_from_rfc3339(&self.last_update)
            .ok()
            .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d").to_string())
    }

    pub fn load(ide_dir: &Path) -> Result<Self> {
        let path = paths::settings_path(ide_dir);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AgenticError::SettingsNotFound { path });
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|source| AgenticError::SettingsParse { path, source })
    }

    pub fn save(&self, ide_dir: &Path) -> Result<()> {
        let path = paths::settings_path(ide_dir);
        let wrap = |e: AgenticError| AgenticError::SettingsWrite {
            path: path.clone(),
            source: Box::new(e),
        };
        let mut data = serde_json::to_string_pretty(self).map_err(|e| wrap(e.into()))?;
        data.push('\n');
        atomic_write(&path, data.as_bytes()).map_err(|e| wrap(e.into()))
    }
}

/// Read the settings stored in `ide_dir`.
pub fn read_settings(ide_dir: &Path) -> Result<AgenticSettings> {
    AgenticSettings::load(ide_dir)
}

/// Write a complete settings file for `options`, replacing whatever was there.
pub fn write_settings(
    ide_dir: &Path,
    options: &TemplateOptions,
    workflows: Option<Vec<String>>,
) -> Result<AgenticSettings> {
    let settings = AgenticSettings::new(options, workflows);
    settings.save(ide_dir)?;
    Ok(settings)
}
