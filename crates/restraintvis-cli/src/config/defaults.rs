use restraintvis::engine::config::{CHAINS_KEYWORD, DEFAULT_URL_TEMPLATE};

pub struct DefaultsConfig {
    pub title: String,
    pub url_template: String,
    pub assembly_id: String,
    pub color: String,
    pub representation: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            title: "with restraint".to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            assembly_id: "1".to_string(),
            color: CHAINS_KEYWORD.to_string(),
            representation: "cartoon".to_string(),
        }
    }
}
