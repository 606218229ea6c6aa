//! Loader for wordwire configuration with YAML + environment overlays.
//!
//! Secrets (Slack token, auth cookie) are expected to arrive as `${VAR}`
//! placeholders that are expanded from the process environment, so the YAML
//! file itself never holds credentials.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct WordwireConfig {
    pub version: Option<String>,
    pub source: SourceSpec,
    pub slack: SlackConfig,
    pub message: MessageConfig,
}

/// Shared fetch fields + the per-site "details"
#[derive(Debug, Deserialize)]
pub struct SourceSpec {
    /// Browser user agent sent on page fetches. Defaults to a desktop
    /// Firefox string; some dictionary sites reject obvious bots.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional session cookie forwarded verbatim on page fetches.
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(flatten)]
    pub details: SourceDetails,
}

/// The tag is `kind`; the payload lives in `config`
#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum SourceDetails {
    #[serde(rename = "dictionary")]
    Dictionary { config: DictionarySourceConfig },

    #[serde(rename = "wordsmith")]
    Wordsmith { config: WordsmithSourceConfig },
}

/// Dictionary.com-style word-of-the-day page plus a per-word browse page
/// consulted for pronunciation.
#[derive(Debug, Deserialize)]
pub struct DictionarySourceConfig {
    pub page_url: String,
    #[serde(default = "default_lookup_base")]
    pub lookup_base: String,
}

/// A.Word.A.Day-style page carrying every field inline.
#[derive(Debug, Deserialize)]
pub struct WordsmithSourceConfig {
    pub page_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SlackConfig {
    pub auth_token: String,
    pub channel_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageConfig {
    /// Static closing line appended as the final message section.
    pub closing: String,
    /// Plain-text notification fallback shown by Slack clients that do not
    /// render blocks.
    #[serde(default = "default_notify_text")]
    pub notify_text: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:134.0) Gecko/20100101 Firefox/134.0".into()
}
fn default_lookup_base() -> String {
    "https://www.dictionary.com/browse".into()
}
fn default_notify_text() -> String {
    "WOTD incoming!".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct WordwireConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for WordwireConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WordwireConfigLoader {
    /// Start with sensible defaults: YAML file + `WORDWIRE_` env overrides.
    ///
    /// ```
    /// use wordwire_config::WordwireConfigLoader;
    ///
    /// let config = WordwireConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// source:
    ///   kind: dictionary
    ///   config:
    ///     page_url: "https://www.dictionary.com/e/word-of-the-day/"
    /// slack:
    ///   auth_token: "xoxb-test"
    ///   channel_id: "C0TEST"
    /// message:
    ///   closing: "Use it in a sentence today."
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.message.notify_text, "WOTD incoming!");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("WORDWIRE").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    ///
    /// The loader combines YAML snippets with `WORDWIRE_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// typed structs.
    ///
    /// ```
    /// use wordwire_config::{SourceDetails, WordwireConfigLoader};
    ///
    /// unsafe { std::env::set_var("SLACK_BOT_TOKEN", "xoxb-from-env"); }
    ///
    /// let config = WordwireConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// source:
    ///   kind: wordsmith
    ///   config:
    ///     page_url: "https://wordsmith.org/words/today.html"
    /// slack:
    ///   auth_token: "${SLACK_BOT_TOKEN}"
    ///   channel_id: "C0TEST"
    /// message:
    ///   closing: "Go forth and use it."
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.slack.auth_token, "xoxb-from-env");
    /// assert!(matches!(config.source.details, SourceDetails::Wordsmith { .. }));
    ///
    /// unsafe { std::env::remove_var("SLACK_BOT_TOKEN"); }
    /// ```
    pub fn load(self) -> Result<WordwireConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: WordwireConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use temp_env;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${STATE}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Winston", { "loc": "Winston-NC" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                // BAR references BAZ; FOO references BAR. Two hops.
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            // Only terminating matters here; the depth cap stops the cycle.
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }
}
