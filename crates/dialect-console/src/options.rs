//! Console display options parsed from the page's query string.

/// Vendor namespace prepended to a bare model name from the `model` query
/// parameter.
pub const MODEL_VENDOR_PREFIX: &str = "fixie-ai/";

/// Query-parameter toggles recognized by the demo page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Show the agent-mute control.
    pub show_speaker_mute: bool,
    /// Show the debug-message view.
    pub show_debug_messages: bool,
    /// Show user-side transcript entries, not just the agent's.
    pub show_user_transcripts: bool,
    /// Model name override, namespaced under [`MODEL_VENDOR_PREFIX`].
    pub model_override: Option<String>,
}

impl ConsoleOptions {
    /// Parses options from a URL query string (without the leading `?`).
    /// Unknown parameters are ignored; toggles require the literal `true`.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "showSpeakerMute" => options.show_speaker_mute = value == "true",
                "showDebugMessages" => options.show_debug_messages = value == "true",
                "showUserTranscripts" => options.show_user_transcripts = value == "true",
                "model" if !value.is_empty() => {
                    options.model_override = Some(format!("{MODEL_VENDOR_PREFIX}{value}"));
                }
                _ => {}
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_defaults() {
        assert_eq!(ConsoleOptions::from_query(""), ConsoleOptions::default());
    }

    #[test]
    fn toggles_require_literal_true() {
        let options =
            ConsoleOptions::from_query("showSpeakerMute=true&showDebugMessages=1&showUserTranscripts=yes");
        assert!(options.show_speaker_mute);
        assert!(!options.show_debug_messages);
        assert!(!options.show_user_transcripts);
    }

    #[test]
    fn model_override_is_vendor_namespaced() {
        let options = ConsoleOptions::from_query("model=ultravox-8B");
        assert_eq!(options.model_override.as_deref(), Some("fixie-ai/ultravox-8B"));
    }

    #[test]
    fn empty_model_parameter_is_ignored() {
        let options = ConsoleOptions::from_query("model=");
        assert_eq!(options.model_override, None);
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let options = ConsoleOptions::from_query("utm_source=x&showDebugMessages=true");
        assert!(options.show_debug_messages);
        assert!(!options.show_speaker_mute);
    }
}
