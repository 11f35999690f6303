//! Generation behavior configuration.

use serde::{Deserialize, Serialize};

const fn default_per_day() -> u32 {
    1
}

const fn default_services_min() -> u32 {
    2
}

const fn default_services_max() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// How many new-application slots each iteration attempts.
    #[serde(default = "default_per_day")]
    pub new_apps_per_day: u32,

    /// How many review/fix slots each iteration attempts.
    #[serde(default = "default_per_day")]
    pub bug_fixes_per_day: u32,

    /// Minimum AWS services sampled per idea.
    #[serde(default = "default_services_min")]
    pub services_per_idea_min: u32,

    /// Maximum AWS services sampled per idea.
    #[serde(default = "default_services_max")]
    pub services_per_idea_max: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            new_apps_per_day: default_per_day(),
            bug_fixes_per_day: default_per_day(),
            services_per_idea_min: default_services_min(),
            services_per_idea_max: default_services_max(),
        }
    }
}
