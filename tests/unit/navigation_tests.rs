/*!
 * Tests for the navigation lifecycle state machine
 */

use listenup::navigation::{LifecycleEvent, NavigationMachine, NavigationState, PageType, WatchRoute};

const WATCH_ABC: &str = "https://www.youtube.com/watch?v=abc";
const WATCH_XYZ: &str = "https://www.youtube.com/watch?v=xyz";
const HOME: &str = "https://www.youtube.com/";

fn events_for(machine: &mut NavigationMachine, hrefs: &[&str]) -> Vec<LifecycleEvent> {
    hrefs
        .iter()
        .filter_map(|href| machine.observe_href(href).event)
        .collect()
}

fn on_abc() -> NavigationMachine {
    NavigationMachine::with_state(
        WatchRoute::default(),
        NavigationState {
            current_video_id: Some("abc".to_string()),
            on_video_page: true,
        },
    )
}

/// Re-observing the current video emits nothing
#[test]
fn test_observe_withSameVideo_shouldEmitZeroEvents() {
    let mut machine = on_abc();
    assert!(events_for(&mut machine, &[WATCH_ABC, WATCH_ABC, WATCH_ABC]).is_empty());
}

/// A different video emits exactly one event
#[test]
fn test_observe_withNewVideo_shouldEmitExactlyOneVideoChanged() {
    let mut machine = on_abc();
    let events = events_for(&mut machine, &[WATCH_XYZ, WATCH_XYZ]);
    assert_eq!(events, vec![LifecycleEvent::VideoChanged("xyz".to_string())]);
}

/// Leaving the watch route emits exactly one page change
#[test]
fn test_observe_withNonWatchPage_shouldEmitExactlyOnePageChanged() {
    let mut machine = on_abc();
    let events = events_for(&mut machine, &[HOME, HOME, "https://www.youtube.com/feed/trending"]);
    assert_eq!(events, vec![LifecycleEvent::PageChanged(PageType::NonVideo)]);
    assert_eq!(machine.state(), &NavigationState::default());
}

/// A full browsing session produces one event per real transition
#[test]
fn test_observe_withBrowsingSession_shouldEmitOnePerTransition() {
    let mut machine = NavigationMachine::default();
    let events = events_for(
        &mut machine,
        &[HOME, WATCH_ABC, WATCH_ABC, WATCH_XYZ, HOME, HOME, WATCH_XYZ, "not a url", "https://www.youtube.com/watch"],
    );

    assert_eq!(
        events,
        vec![
            LifecycleEvent::VideoChanged("abc".to_string()),
            LifecycleEvent::VideoChanged("xyz".to_string()),
            LifecycleEvent::PageChanged(PageType::NonVideo),
            LifecycleEvent::VideoChanged("xyz".to_string()),
            LifecycleEvent::PageChanged(PageType::NonVideo),
        ]
    );
}

/// Reset returns to the load state
#[test]
fn test_reset_withActiveVideo_shouldClearState() {
    let mut machine = on_abc();
    machine.reset();
    assert_eq!(machine.state(), &NavigationState::default());
    assert_eq!(
        machine.observe_href(WATCH_ABC).event,
        Some(LifecycleEvent::VideoChanged("abc".to_string()))
    );
}

/// Non-watch paths with the id parameter still count as video pages
#[test]
fn test_observe_withVideoParamOnOtherPath_shouldTreatAsWatchPage() {
    let mut machine = NavigationMachine::default();
    let transition = machine.observe_href("https://m.youtube.com/embed-ish?feature=share&v=q1");
    assert_eq!(transition.event, Some(LifecycleEvent::VideoChanged("q1".to_string())));
}
