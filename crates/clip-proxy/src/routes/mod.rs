pub(crate) mod clips;

use axum::{Router, routing::get};
use reel_clip_search::ClipSearch;

use crate::config::ClipProxyConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub search: ClipSearch,
    pub cache_control: String,
}

fn make_state(config: ClipProxyConfig) -> reel_clip_search::Result<AppState> {
    let cache_control = config.cache_control();
    let search = ClipSearch::from_config(config.upstream)?;

    Ok(AppState {
        search,
        cache_control,
    })
}

pub fn router(config: ClipProxyConfig) -> reel_clip_search::Result<Router> {
    let state = make_state(config)?;

    Ok(Router::new()
        .route("/clips", get(clips::handler))
        .with_state(state))
}
