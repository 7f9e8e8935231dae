/*!
 * Navigation signal sources.
 *
 * On the page, a possible navigation shows up as a DOM subtree mutation, a
 * history pop, or the site's own "navigation finished" event. All of them are
 * reduced to one `NavigationSignal` stream; the lifecycle controller reads the
 * current location from a `LocationProvider` when it re-evaluates.
 */

use std::fmt::Debug;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::{self, BoxStream};
use log::{error, warn};
use parking_lot::RwLock;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::mpsc;

use crate::errors::NavigationError;

/// Raw hint that the page may have navigated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSignal {
    /// DOM subtree changed
    Mutation,
    /// Browser back/forward
    HistoryPop,
    /// Single-page-app navigation finished
    SpaNavigation,
}

/// Current URL of the host page
pub trait LocationProvider: Send + Sync + Debug {
    fn href(&self) -> String;
}

/// Source of navigation signals
pub trait SignalSource {
    /// Stream of signals; ends when the source goes away
    fn subscribe(&mut self) -> BoxStream<'static, NavigationSignal>;
}

/// Location shared between whoever drives the page and the controller
#[derive(Debug, Clone, Default)]
pub struct SharedLocation {
    href: Arc<RwLock<String>>,
}

impl SharedLocation {
    pub fn new(href: impl Into<String>) -> Self {
        SharedLocation {
            href: Arc::new(RwLock::new(href.into())),
        }
    }

    pub fn set(&self, href: impl Into<String>) {
        *self.href.write() = href.into();
    }
}

impl LocationProvider for SharedLocation {
    fn href(&self) -> String {
        self.href.read().clone()
    }
}

/// Signals pushed through an in-process channel
#[derive(Debug)]
pub struct ChannelSignalSource {
    receiver: Option<mpsc::UnboundedReceiver<NavigationSignal>>,
}

impl ChannelSignalSource {
    /// Sender half plus the source to hand to the controller
    pub fn channel() -> (mpsc::UnboundedSender<NavigationSignal>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, ChannelSignalSource { receiver: Some(receiver) })
    }
}

impl SignalSource for ChannelSignalSource {
    fn subscribe(&mut self) -> BoxStream<'static, NavigationSignal> {
        match self.receiver.take() {
            Some(receiver) => stream::unfold(receiver, |mut receiver| async move {
                receiver.recv().await.map(|signal| (signal, receiver))
            })
            .boxed(),
            None => {
                warn!("Signal channel already subscribed");
                stream::empty().boxed()
            }
        }
    }
}

/// Parse one line of the form `<mutation|popstate|navigate> [URL]`.
///
/// Blank lines and lines starting with `#` yield `Ok(None)`.
pub fn parse_signal_line(line: &str) -> Result<Option<(NavigationSignal, Option<String>)>, NavigationError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let kind = parts.next().unwrap_or_default();
    let url = parts.next().map(str::trim).filter(|u| !u.is_empty()).map(str::to_string);

    let signal = match kind.to_lowercase().as_str() {
        "mutation" => NavigationSignal::Mutation,
        "popstate" => NavigationSignal::HistoryPop,
        "navigate" => NavigationSignal::SpaNavigation,
        _ => return Err(NavigationError::UnknownSignal(line.to_string())),
    };

    Ok(Some((signal, url)))
}

/// Signals read as text lines; a URL on the line updates the shared location first
#[derive(Debug)]
pub struct LineSignalSource<R> {
    reader: Option<R>,
    location: SharedLocation,
}

/// Line source reading from standard input
pub type StdinSignalSource = LineSignalSource<BufReader<Stdin>>;

impl<R> LineSignalSource<R> {
    pub fn new(reader: R, location: SharedLocation) -> Self {
        LineSignalSource {
            reader: Some(reader),
            location,
        }
    }
}

impl StdinSignalSource {
    pub fn stdin(location: SharedLocation) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), location)
    }
}

impl<R> SignalSource for LineSignalSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn subscribe(&mut self) -> BoxStream<'static, NavigationSignal> {
        let Some(reader) = self.reader.take() else {
            warn!("Signal reader already subscribed");
            return stream::empty().boxed();
        };

        let state = (reader.lines(), self.location.clone());
        stream::unfold(state, |(mut lines, location)| async move {
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match parse_signal_line(&line) {
                        Ok(Some((signal, url))) => {
                            if let Some(url) = url {
                                location.set(url);
                            }
                            return Some((signal, (lines, location)));
                        }
                        Ok(None) => continue,
                        Err(e) => warn!("{}", e),
                    },
                    Ok(None) => return None,
                    Err(e) => {
                        error!("Failed to read navigation signals: {}", e);
                        return None;
                    }
                }
            }
        })
        .boxed()
    }
}
