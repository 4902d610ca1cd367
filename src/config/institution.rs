//! Institution configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::document::Letterhead;

/// Institution details printed on report cards
#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_college")]
    pub college: String,

    /// Signature used when a submission leaves it blank
    pub default_signature: Option<String>,

    #[serde(default = "default_signatory_title")]
    pub signatory_title: String,
}

impl InstitutionConfig {
    pub fn letterhead(&self) -> Letterhead {
        Letterhead {
            institution_name: self.name.clone(),
            college_name: self.college.clone(),
            signatory_title: self.signatory_title.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankInstitutionName);
        }
        if self.signatory_title.trim().is_empty() {
            return Err(ValidationError::BlankSignatoryTitle);
        }
        Ok(())
    }
}

impl Default for InstitutionConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            college: default_college(),
            default_signature: None,
            signatory_title: default_signatory_title(),
        }
    }
}

fn default_name() -> String {
    "State University".to_string()
}

fn default_college() -> String {
    "College of Technology".to_string()
}

fn default_signatory_title() -> String {
    "Program Director".to_string()
}
