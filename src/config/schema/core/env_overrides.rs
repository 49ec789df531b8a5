use super::Config;

fn first_non_empty(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = first_non_empty(&["STARK_API_KEY", "OPENAI_API_KEY"]) {
            self.api_key = Some(key);
        }

        if let Some(model) = first_non_empty(&["STARK_MODEL"]) {
            self.default_model = model;
        }

        if let Some(base_url) = first_non_empty(&["STARK_API_BASE_URL"]) {
            self.api_base_url = base_url;
        }

        if let Some(file) = first_non_empty(&["STARK_DEFAULT_SUMMARY_FILE", "DEFAULT_SUMMARY_FILE"])
        {
            self.default_summary_file = file;
        }

        if let Some(workspace) = first_non_empty(&["STARK_WORKSPACE"]) {
            self.workspace_dir = Some(workspace);
        }

        if let Some(level) = first_non_empty(&["STARK_LOG_LEVEL"]) {
            self.logging.level = level;
        }
    }
}
