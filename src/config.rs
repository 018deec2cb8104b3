//! Reply template configuration.
//!
//! Templates are chosen per entity kind, and can be overridden per network
//! and per channel. The pipeline only sees the [`TemplateProvider`] trait,
//! so hosts can plug in their own configuration store.
//!
//! ```toml
//! [templates]
//! master = "{{artists}}- {{title}} ({{year}})"
//!
//! [networks.libera.templates]
//! release = "{{artists}}- {{title}} [{{formats}}]"
//!
//! [networks.libera.channels."#vinyl"]
//! release = "{{artists}}- {{title}} ({{labels}}) for sale: {{for_sale}}"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SnarfError};
use crate::models::EntityKind;
use crate::render;

/// Built-in template for releases.
pub const DEFAULT_RELEASE_TEMPLATE: &str = "{{artists}}- {{title}} ({{year}}) [{{formats}}] \
     {{labels}} | have: {{have}} want: {{want}} for sale: {{for_sale}}";

/// Built-in template for masters.
pub const DEFAULT_MASTER_TEMPLATE: &str = "{{artists}}- {{title}} ({{year}})";

/// Where a message came from.
///
/// Both parts are only used as lookup keys into [`TemplateConfig`], which
/// compares them case-insensitively (ASCII and Unicode lowercase).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyContext {
    pub network: Option<String>,
    pub channel: Option<String>,
}

impl ReplyContext {
    /// Context for a message in `channel` on `network`.
    pub fn new<S1: Into<String>, S2: Into<String>>(network: S1, channel: S2) -> Self {
        Self {
            network: Some(network.into()),
            channel: Some(channel.into()),
        }
    }
}

/// Source of reply templates.
pub trait TemplateProvider: Send + Sync {
    /// Template to use for `kind` in the given context.
    fn template(&self, kind: EntityKind, ctx: &ReplyContext) -> String;
}

impl<F> TemplateProvider for F
where
    F: Fn(EntityKind, &ReplyContext) -> String + Send + Sync,
{
    fn template(&self, kind: EntityKind, ctx: &ReplyContext) -> String {
        self(kind, ctx)
    }
}

/// Optional template per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Templates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
}

impl Templates {
    /// Template configured for `kind`, if any.
    pub fn get(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Release => self.release.as_deref(),
            EntityKind::Master => self.master.as_deref(),
        }
    }

    /// Set the template for `kind`.
    pub fn set<S: Into<String>>(&mut self, kind: EntityKind, template: S) {
        let slot = match kind {
            EntityKind::Release => &mut self.release,
            EntityKind::Master => &mut self.master,
        };
        *slot = Some(template.into());
    }

    fn merge(&mut self, other: Templates) {
        if other.release.is_some() {
            self.release = other.release;
        }
        if other.master.is_some() {
            self.master = other.master;
        }
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        self.release.iter().chain(self.master.iter()).map(String::as_str)
    }
}

/// Overrides for one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkTemplates {
    #[serde(default)]
    pub templates: Templates,
    /// Per-channel overrides, keyed by lowercase channel name.
    #[serde(default)]
    pub channels: HashMap<String, Templates>,
}

/// Layered template configuration: channel, then network, then global,
/// then the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub templates: Templates,
    /// Per-network overrides, keyed by lowercase network name.
    #[serde(default)]
    pub networks: HashMap<String, NetworkTemplates>,
}

impl TemplateConfig {
    /// Parse a TOML configuration and validate every template in it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid TOML and `TemplateError` for a
    /// template that does not parse or names an unknown field.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let parsed: TemplateConfig =
            toml::from_str(text).map_err(|e| SnarfError::ConfigError(e.to_string()))?;
        let config = parsed.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading template config");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check every configured template.
    pub fn validate(&self) -> Result<()> {
        let network_templates = self.networks.values().flat_map(|network| {
            network
                .templates
                .iter()
                .chain(network.channels.values().flat_map(Templates::iter))
        });
        for template in self.templates.iter().chain(network_templates) {
            render::validate(template)?;
        }
        Ok(())
    }

    /// Set the global template for `kind`.
    pub fn set_default<S: Into<String>>(&mut self, kind: EntityKind, template: S) {
        self.templates.set(kind, template);
    }

    /// Set the template for `kind` on one network.
    pub fn set_network<S: Into<String>>(&mut self, network: &str, kind: EntityKind, template: S) {
        self.networks
            .entry(network.to_lowercase())
            .or_default()
            .templates
            .set(kind, template);
    }

    /// Set the template for `kind` in one channel of one network.
    pub fn set_channel<S: Into<String>>(
        &mut self,
        network: &str,
        channel: &str,
        kind: EntityKind,
        template: S,
    ) {
        self.networks
            .entry(network.to_lowercase())
            .or_default()
            .channels
            .entry(channel.to_lowercase())
            .or_default()
            .set(kind, template);
    }

    /// Resolve the template for `kind` in `ctx`.
    ///
    /// Network and channel names are lowercased before lookup, so
    /// `#Vinyl` on `Libera` finds templates configured for `#vinyl` on
    /// `libera`.
    pub fn lookup(&self, kind: EntityKind, ctx: &ReplyContext) -> &str {
        let network = ctx
            .network
            .as_deref()
            .and_then(|name| self.networks.get(&name.to_lowercase()));

        let channel_template = network.and_then(|network| {
            ctx.channel
                .as_deref()
                .and_then(|name| network.channels.get(&name.to_lowercase()))
                .and_then(|templates| templates.get(kind))
        });

        channel_template
            .or_else(|| network.and_then(|network| network.templates.get(kind)))
            .or_else(|| self.templates.get(kind))
            .unwrap_or(match kind {
                EntityKind::Release => DEFAULT_RELEASE_TEMPLATE,
                EntityKind::Master => DEFAULT_MASTER_TEMPLATE,
            })
    }

    /// Lowercase network and channel keys, merging entries that only
    /// differed by case.
    fn normalized(self) -> Self {
        let mut networks: HashMap<String, NetworkTemplates> = HashMap::new();
        for (name, network) in self.networks {
            let merged = networks.entry(name.to_lowercase()).or_default();
            merged.templates.merge(network.templates);
            for (chan, templates) in network.channels {
                merged
                    .channels
                    .entry(chan.to_lowercase())
                    .or_default()
                    .merge(templates);
            }
        }
        Self {
            templates: self.templates,
            networks,
        }
    }
}

impl TemplateProvider for TemplateConfig {
    fn template(&self, kind: EntityKind, ctx: &ReplyContext) -> String {
        self.lookup(kind, ctx).to_string()
    }
}
