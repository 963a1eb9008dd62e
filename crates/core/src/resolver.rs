//! Redirect resolution for "page not found" failures.
//!
//! [`RedirectResolver::resolve`] is the last-resort handler for a failed
//! request. Only site-side 404s are resolved; everything else is forwarded to
//! the previously installed [`FallbackHandler`] or rendered as-is.
//!
//! For a 404 the resolver:
//!
//! 1. skips the store entirely for URLs carrying injection probe markers,
//! 2. looks up a rule for the decoded absolute URL, then for the decoded
//!    server-relative URL if the first lookup found nothing published,
//! 3. redirects (3xx) or re-signals the error under the rule's code (any other),
//! 4. otherwise records the miss (new record or one more hit) and renders
//!    the original error.
//!
//! Storage failures never escape: they are rendered as a 404 carrying the
//! storage error as its cause.

use std::sync::Arc;

use crate::config::RedirectConfig;
use crate::error::{CoreError, ErrorReport, HttpFailure};
use crate::request::{is_suspicious, RequestContext};
use crate::routing::Router;
use crate::store::{NewMiss, RuleMatch, RuleStore};

/// The only error code the resolver acts on.
pub const PAGE_NOT_FOUND: u16 = 404;

/// Status used when a rule has no code or custom codes are disabled.
pub const DEFAULT_REDIRECT_STATUS: u16 = 301;

/// Message rendered when miss bookkeeping fails.
pub const ERROR_UPDATING_DATABASE: &str =
    "The page could not be found and the redirect table could not be updated.";

/// What the caller should send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redirect the client to `location` with `status`.
    Redirect { location: String, status: u16 },
    /// Render `error` through the generic error renderer.
    Rendered(ErrorReport),
}

/// The error handler that was in place before the resolver, if any.
///
/// Non-404 and administrative errors are handed to it unchanged.
pub trait FallbackHandler: Send + Sync {
    fn handle(&self, error: ErrorReport) -> Outcome;
}

/// Stateless resolution service over a rule store.
#[derive(Clone)]
pub struct RedirectResolver {
    store: Arc<dyn RuleStore>,
    router: Arc<dyn Router>,
    config: RedirectConfig,
    fallback: Option<Arc<dyn FallbackHandler>>,
}

impl RedirectResolver {
    pub fn new(store: Arc<dyn RuleStore>, router: Arc<dyn Router>, config: RedirectConfig) -> Self {
        Self {
            store,
            router,
            config,
            fallback: None,
        }
    }

    /// Chain to the handler that was registered before this resolver.
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackHandler>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Decide how to answer a failed request.
    pub async fn resolve<E>(&self, error: &E, ctx: &RequestContext) -> Outcome
    where
        E: HttpFailure + ?Sized,
    {
        let report = ErrorReport::from_failure(error);

        if ctx.is_admin || report.code != PAGE_NOT_FOUND {
            tracing::debug!(
                resolution = "not_applicable",
                code = report.code,
                admin = ctx.is_admin,
                "Forwarding error to fallback handler",
            );
            return self.forward(report);
        }

        let current = ctx.url.absolute();

        if is_suspicious(&current) {
            tracing::warn!(resolution = "suspicious", url = %current, "Ignoring probe URL");
            return Outcome::Rendered(report);
        }

        match self.lookup(ctx, &current).await {
            Ok(Some(rule)) => return self.apply(rule, report, &current),
            Ok(None) => {}
            Err(err) => return storage_failure(err, &current),
        }

        if let Err(err) = self.bookkeep(ctx, &current).await {
            return storage_failure(err, &current);
        }

        tracing::info!(resolution = "unresolved", url = %current, "No redirect for missing page");
        Outcome::Rendered(report)
    }

    fn forward(&self, report: ErrorReport) -> Outcome {
        match &self.fallback {
            Some(handler) => handler.handle(report),
            None => Outcome::Rendered(report),
        }
    }

    /// Published rule for the absolute URL, else for the relative URL.
    async fn lookup(
        &self,
        ctx: &RequestContext,
        current: &str,
    ) -> Result<Option<RuleMatch>, CoreError> {
        if let Some(rule) = self.store.find_rule(current).await? {
            if rule.published {
                return Ok(Some(rule));
            }
        }

        let relative = ctx.url.relative();
        Ok(self
            .store
            .find_rule(&relative)
            .await?
            .filter(|rule| rule.published))
    }

    fn apply(&self, rule: RuleMatch, report: ErrorReport, current: &str) -> Outcome {
        let status = effective_status(self.config.mode, rule.header);

        if is_redirect(status) {
            let new_url = rule.new_url.unwrap_or_default();
            if new_url.is_empty() {
                tracing::warn!(url = %current, "Published redirect has no destination");
            }
            let location = if self.router.is_internal(&new_url) {
                self.router.route(&new_url)
            } else {
                new_url
            };
            tracing::info!(
                resolution = "redirect",
                url = %current,
                location = %location,
                status,
                "Redirecting missing page",
            );
            return Outcome::Redirect { location, status };
        }

        tracing::info!(resolution = "recode", url = %current, status, "Re-signalling missing page");
        Outcome::Rendered(report.recode(status))
    }

    async fn bookkeep(&self, ctx: &RequestContext, current: &str) -> Result<(), CoreError> {
        match self.store.find_id(current).await? {
            Some(id) => self.store.increment_hits(id).await,
            None if self.config.collect_urls => {
                let miss = NewMiss {
                    old_url: current.to_string(),
                    referer: ctx.referer.clone().unwrap_or_default(),
                    created_date: chrono::Utc::now(),
                };
                self.store.record_miss(&miss).await
            }
            None => Ok(()),
        }
    }
}

/// Status a published rule is answered with.
///
/// Stored codes are honored only in custom header mode. An unset or zero code
/// means 301; any other code is used as-is, so codes outside 300..=399 take
/// the recode path.
pub fn effective_status(mode: bool, header: Option<i32>) -> u16 {
    match header {
        _ if !mode => DEFAULT_REDIRECT_STATUS,
        None | Some(0) => DEFAULT_REDIRECT_STATUS,
        Some(h) => u16::try_from(h).unwrap_or(u16::MAX),
    }
}

/// Whether `status` redirects rather than re-signals the error.
pub fn is_redirect(status: u16) -> bool {
    (300..400).contains(&status)
}

fn storage_failure(err: CoreError, current: &str) -> Outcome {
    tracing::error!(resolution = "storage_failure", url = %current, error = %err, "Redirect table unavailable");
    Outcome::Rendered(
        ErrorReport::new(PAGE_NOT_FOUND, ERROR_UPDATING_DATABASE)
            .with_cause(ErrorReport::from_failure(&err)),
    )
}
