//! The baked-in demo call template.
//!
//! The console does not take a free-form configuration from the user; it
//! starts every call from this template, applying only the model override
//! and the chosen medium.

use crate::call::{CallConfig, SelectedTool, CREATE_PROFILE_TOOL};
use serde::{Deserialize, Serialize};

/// Demo metadata plus the call configuration the console starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Title shown at the top of the demo page.
    pub title: String,
    /// Short description shown while no call is active.
    pub overview: String,
    /// The template call configuration.
    #[serde(rename = "callConfig")]
    pub call_config: CallConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Dialect Coffee Counter".to_string(),
            overview: "Talk to the barista agent to place an order. Start a web call \
                       to speak through your browser, or enter a phone number to have \
                       the agent call you."
                .to_string(),
            call_config: CallConfig {
                system_prompt: DEMO_SYSTEM_PROMPT.to_string(),
                model: "fixie-ai/ultravox-70B".to_string(),
                language_hint: Some("en".to_string()),
                voice: Some("Mark".to_string()),
                temperature: Some(0.3),
                max_duration: Some("240s".to_string()),
                time_exceeded_message: Some(
                    "Sorry, we are over our time limit for this call. Thanks for \
                     stopping by, and have a great day!"
                        .to_string(),
                ),
                selected_tools: vec![SelectedTool::new(CREATE_PROFILE_TOOL)],
                medium: None,
            },
        }
    }
}

const DEMO_SYSTEM_PROMPT: &str = "\
You are a friendly barista taking drink orders at the Dialect coffee counter. \
Greet the customer, take their order, confirm it back to them, and use the \
createProfile tool to record the customer's name and order once they confirm. \
Keep responses short and conversational; never list menu prices unless asked.";
