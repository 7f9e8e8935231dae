/*!
 * Video-change detection for single-page video sites.
 *
 * The machine looks at the current location each time it is asked to, and
 * decides whether the user moved to another video, left the video pages, or
 * nothing relevant happened. Re-observing the video that is already on screen
 * emits nothing; repeated DOM mutation callbacks rely on that.
 *
 * Timing (settle delay) and side effects (cache invalidation, message
 * dispatch) live in [`crate::lifecycle`].
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::NavigationError;

/// Kind of page reported when leaving the video pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "non-video")]
    NonVideo,
}

/// Lifecycle transition detected by the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    VideoChanged(String),
    PageChanged(PageType),
}

impl LifecycleEvent {
    /// Wire message for this event
    pub fn into_message(self, timestamp: i64) -> LifecycleMessage {
        match self {
            Self::VideoChanged(video_id) => LifecycleMessage::VideoChanged { video_id, timestamp },
            Self::PageChanged(page_type) => LifecycleMessage::PageChanged { page_type, timestamp },
        }
    }
}

/// Message sent to the extension background over the lifecycle channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleMessage {
    VideoChanged {
        #[serde(rename = "videoId")]
        video_id: String,
        /// Epoch milliseconds
        timestamp: i64,
    },
    PageChanged {
        #[serde(rename = "pageType")]
        page_type: PageType,
        /// Epoch milliseconds
        timestamp: i64,
    },
}

/// Video identity tracked across navigations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_video_id: Option<String>,
    pub on_video_page: bool,
}

/// What the current location says about the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub is_watch_page: bool,
    pub video_id: Option<String>,
}

impl PageLocation {
    pub fn non_video() -> Self {
        PageLocation {
            is_watch_page: false,
            video_id: None,
        }
    }
}

/// Route conventions used to recognise video pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRoute {
    /// Path prefix of the watch page
    pub watch_path: String,
    /// Query parameter carrying the video id
    pub video_param: String,
}

impl Default for WatchRoute {
    fn default() -> Self {
        WatchRoute {
            watch_path: "/watch".to_string(),
            video_param: "v".to_string(),
        }
    }
}

impl WatchRoute {
    pub fn new(watch_path: impl Into<String>, video_param: impl Into<String>) -> Self {
        WatchRoute {
            watch_path: watch_path.into(),
            video_param: video_param.into(),
        }
    }

    /// Classify a parsed URL
    pub fn classify(&self, url: &Url) -> PageLocation {
        let param = url
            .query_pairs()
            .find(|(key, _)| key == self.video_param.as_str())
            .map(|(_, value)| value.into_owned());

        let is_watch_page = url.path().starts_with(&self.watch_path) || param.is_some();
        let video_id = if is_watch_page {
            param.filter(|id| !id.is_empty())
        } else {
            None
        };

        PageLocation { is_watch_page, video_id }
    }

    /// Parse and classify a location string
    pub fn classify_href(&self, href: &str) -> Result<PageLocation, NavigationError> {
        let url = Url::parse(href).map_err(|source| NavigationError::InvalidUrl {
            url: href.to_string(),
            source,
        })?;
        Ok(self.classify(&url))
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Event to dispatch, if any
    pub event: Option<LifecycleEvent>,
    /// Whether the cached video element must be dropped
    pub clear_cache: bool,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }

    fn cache_only() -> Self {
        Transition {
            event: None,
            clear_cache: true,
        }
    }

    fn emit(event: LifecycleEvent) -> Self {
        Transition {
            event: Some(event),
            clear_cache: true,
        }
    }
}

/// Navigation lifecycle state machine
#[derive(Debug, Clone, Default)]
pub struct NavigationMachine {
    state: NavigationState,
    route: WatchRoute,
}

impl NavigationMachine {
    pub fn new(route: WatchRoute) -> Self {
        NavigationMachine {
            state: NavigationState::default(),
            route,
        }
    }

    /// Start from an explicit state
    pub fn with_state(route: WatchRoute, state: NavigationState) -> Self {
        NavigationMachine { state, route }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn route(&self) -> &WatchRoute {
        &self.route
    }

    /// Back to `{none, false}`
    pub fn reset(&mut self) {
        self.state = NavigationState::default();
    }

    /// Evaluate a location string; unparseable locations count as non-video pages
    pub fn observe_href(&mut self, href: &str) -> Transition {
        let location = match self.route.classify_href(href) {
            Ok(location) => location,
            Err(e) => {
                debug!("{}", e);
                PageLocation::non_video()
            }
        };
        self.observe(&location)
    }

    /// Evaluate a classified location
    pub fn observe(&mut self, location: &PageLocation) -> Transition {
        if self.state.on_video_page && !location.is_watch_page {
            info!("Left video page");
            self.reset();
            return Transition::emit(LifecycleEvent::PageChanged(PageType::NonVideo));
        }

        if !location.is_watch_page {
            return Transition::unchanged();
        }

        match &location.video_id {
            Some(video_id) if self.state.current_video_id.as_ref() != Some(video_id) => {
                info!(
                    "Video changed: {} -> {}",
                    self.state.current_video_id.as_deref().unwrap_or("none"),
                    video_id
                );
                self.state = NavigationState {
                    current_video_id: Some(video_id.clone()),
                    on_video_page: true,
                };
                Transition::emit(LifecycleEvent::VideoChanged(video_id.clone()))
            }
            Some(video_id) if !self.state.on_video_page => {
                info!("Back on video page: {}", video_id);
                self.state.on_video_page = true;
                Transition::cache_only()
            }
            Some(_) => Transition::unchanged(),
            None if self.state.current_video_id.is_some() => {
                info!("Watch page without video id");
                self.reset();
                Transition::emit(LifecycleEvent::PageChanged(PageType::NonVideo))
            }
            None => Transition::unchanged(),
        }
    }
}
