use crate::model::ConduitCategory;

/// What to do when the host fails to create one opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Log the failure and keep placing the remaining openings.
    #[default]
    SkipAndContinue,
    /// Roll back the category's unit of work and move on to the next category.
    AbortCategory,
}

/// Settings for a placement run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Categories to process, in order. Each gets its own unit of work.
    pub categories: Vec<ConduitCategory>,
    pub failure_policy: FailurePolicy,
    /// Family name of the opening template.
    pub template_family: String,
    /// Template parameter receiving the opening width.
    pub width_parameter: String,
    /// Template parameter receiving the opening height.
    pub height_parameter: String,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            categories: vec![ConduitCategory::Duct, ConduitCategory::Pipe],
            failure_policy: FailurePolicy::default(),
            template_family: "Opening".to_owned(),
            width_parameter: "Width".to_owned(),
            height_parameter: "Height".to_owned(),
        }
    }
}

impl PlacementConfig {
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<ConduitCategory>) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_template_family(mut self, family: impl Into<String>) -> Self {
        self.template_family = family.into();
        self
    }

    /// Sets the names of the width and height parameters.
    #[must_use]
    pub fn with_size_parameters(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width_parameter = width.into();
        self.height_parameter = height.into();
        self
    }
}
