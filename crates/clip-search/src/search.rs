use futures_util::future::join_all;
use reel_clip_interface::ClipResult;

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::extract::{self, Candidate};
use crate::session::{Session, SessionProvider, SessionSource};
use crate::upstream::UpstreamClient;

/// Maximum number of search hits resolved per query.
pub const RESULT_CAP: usize = 5;

/// Turns a phrase into an ordered list of playable clips.
#[derive(Clone)]
pub struct ClipSearch<S = SessionSource> {
    upstream: UpstreamClient,
    sessions: S,
}

impl ClipSearch<SessionSource> {
    pub fn from_config(config: UpstreamConfig) -> Result<Self> {
        let upstream = UpstreamClient::new(config)?;
        let sessions = SessionSource::from_config(upstream.config(), upstream.clone());
        Ok(Self::new(upstream, sessions))
    }
}

impl<S: SessionProvider> ClipSearch<S> {
    pub fn new(upstream: UpstreamClient, sessions: S) -> Self {
        Self { upstream, sessions }
    }

    pub async fn fetch_clips(&self, phrase: &str, language: &str) -> Result<Vec<ClipResult>> {
        let session = self.sessions.acquire().await;
        if session.is_anonymous() {
            tracing::warn!("upstream_session_anonymous");
        }

        let body = self.upstream.search(&session, phrase, language).await?;
        let candidates = extract::candidates(&body);

        tracing::info!(
            phrase = %phrase,
            language = %language,
            candidate_count = candidates.len(),
            "clip_search_completed"
        );

        // join_all yields outputs in input order regardless of completion order.
        let resolved = join_all(
            candidates
                .into_iter()
                .map(|candidate| self.resolve(&session, candidate)),
        )
        .await;

        let clips: Vec<ClipResult> = resolved
            .into_iter()
            .flatten()
            .filter(ClipResult::is_playable)
            .collect();

        if clips.is_empty() {
            tracing::info!(phrase = %phrase, "clip_search_empty");
            return Err(Error::EmptyResult);
        }

        tracing::info!(clip_count = clips.len(), "clips_resolved");
        Ok(clips)
    }

    async fn resolve(&self, session: &Session, candidate: Candidate) -> Option<ClipResult> {
        let detail = match self.upstream.detail(session, &candidate.id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(id = %candidate.id, error = %e, "clip_detail_failed");
                return None;
            }
        };

        let Some(url) = extract::video_url(&detail) else {
            tracing::warn!(id = %candidate.id, "clip_detail_missing_url");
            return None;
        };

        Some(ClipResult {
            url,
            subtitle: candidate.subtitle.or_else(|| extract::subtitle(&detail)),
        })
    }
}
