//! SMS message templates

use std::collections::HashMap;
use std::sync::Arc;

use bb_core::errors::SmsError;

/// Template id -> body, with `{0}`, `{1}`... replaced by positional args
#[derive(Debug, Clone, Default)]
pub struct SmsTemplates {
    bodies: Arc<HashMap<String, String>>,
}

impl SmsTemplates {
    pub fn new(bodies: HashMap<String, String>) -> Self {
        Self {
            bodies: Arc::new(bodies),
        }
    }

    pub fn contains(&self, template_id: &str) -> bool {
        self.bodies.contains_key(template_id)
    }

    /// Render `template_id` with `args`
    ///
    /// Placeholders without a matching argument are left as they are.
    pub fn render(&self, template_id: &str, args: &[String]) -> Result<String, SmsError> {
        let body = self
            .bodies
            .get(template_id)
            .ok_or_else(|| SmsError::UnknownTemplate(template_id.to_string()))?;

        let rendered = args
            .iter()
            .enumerate()
            .fold(body.clone(), |text, (i, arg)| {
                text.replace(&format!("{{{}}}", i), arg)
            });
        Ok(rendered)
    }
}
