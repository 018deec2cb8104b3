//! Link-to-reply pipeline.
//!
//! Matches a Discogs link in a message, fetches the record, derives the
//! display fields and renders the configured template into a one-line
//! reply.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::api::DiscogsApi;
use crate::config::{ReplyContext, TemplateConfig, TemplateProvider};
use crate::converters::derive_fields;
use crate::error::Result;
use crate::link;
use crate::models::EntityRef;
use crate::render;

/// Destination for rendered replies.
pub trait ReplySink {
    /// Deliver `text` to the chat context the message came from.
    fn reply(&self, ctx: &ReplyContext, text: &str);
}

/// The snarfer pipeline.
///
/// Holds no per-message state, so one instance can serve concurrent
/// lookups from several tasks.
///
/// # Example
///
/// ```rust,no_run
/// use discogs_snarfer::{ReplyContext, Snarfer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let snarfer = Snarfer::with_defaults()?;
///     let ctx = ReplyContext::new("libera", "#music");
///     if let Some(reply) = snarfer
///         .handle("https://www.discogs.com/release/249504-Daft-Punk-Homework", &ctx)
///         .await?
///     {
///         println!("{}", reply);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Snarfer {
    api: DiscogsApi,
    templates: Arc<dyn TemplateProvider>,
}

impl fmt::Debug for Snarfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snarfer")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Snarfer {
    /// Create a pipeline from an API client and a template source.
    pub fn new<P: TemplateProvider + 'static>(api: DiscogsApi, templates: P) -> Self {
        Self {
            api,
            templates: Arc::new(templates),
        }
    }

    /// Pipeline against the public API with the built-in templates.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(DiscogsApi::new()?, TemplateConfig::default()))
    }

    /// The API client used for lookups.
    pub fn api(&self) -> &DiscogsApi {
        &self.api
    }

    /// Produce a reply for the first Discogs link in `text`.
    ///
    /// Returns `Ok(None)` without any request when `text` has no link.
    pub async fn handle(&self, text: &str, ctx: &ReplyContext) -> Result<Option<String>> {
        let Some(entity) = link::find_link(text) else {
            return Ok(None);
        };
        self.render_entity(entity, ctx).await.map(Some)
    }

    /// Fetch, derive and render one already-matched entity.
    pub async fn render_entity(&self, entity: EntityRef, ctx: &ReplyContext) -> Result<String> {
        let data = self.api.fetch(&entity).await?;
        let fields = derive_fields(entity.kind, &data);

        let template = self.templates.template(entity.kind, ctx);
        debug!(entity = %entity, template = %template, "Selected reply template");

        let reply = render::render(&template, &fields)?;
        info!(entity = %entity, "Rendered Discogs reply");
        Ok(reply)
    }

    /// Like [`handle`](Self::handle), delivering the reply to `sink`.
    ///
    /// Nothing is sent when there is no link or a stage fails. Returns
    /// whether a reply was sent.
    pub async fn handle_into<S: ReplySink + ?Sized>(
        &self,
        text: &str,
        ctx: &ReplyContext,
        sink: &S,
    ) -> Result<bool> {
        match self.handle(text, ctx).await? {
            Some(reply) => {
                sink.reply(ctx, &reply);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
