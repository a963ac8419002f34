//! One-shot element feed download

use super::ElementSet;

/// Celestrak feed carrying the station element sets.
pub const FEED_URL: &str = "https://celestrak.com/NORAD/elements/stations.txt";

/// The feed could not be turned into an element set.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Transport failure, bad HTTP status, or unreadable body
    Http(String),

    /// Fewer than the three lines an element set needs
    MalformedFeed { lines: usize },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(message) => write!(f, "feed request failed: {}", message),
            Self::MalformedFeed { lines } => {
                write!(f, "feed returned {} line(s), need at least 3", lines)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Download the feed and keep the first object in it.
///
/// Invoked at most once per process; the returned value is the process-wide
/// element set for the whole run.
pub fn fetch_element_set(url: &str) -> Result<ElementSet, FetchError> {
    log::info!("Fetching element set from {}", url);

    let body = ureq::get(url)
        .call()
        .map_err(|e| FetchError::Http(e.to_string()))?
        .into_string()
        .map_err(|e| FetchError::Http(e.to_string()))?;

    let elements = parse_feed(&body)?;
    log::info!("Feed supplied element set for {}", elements.name);
    Ok(elements)
}

/// First three lines of the feed body: name, line 1, line 2.
pub fn parse_feed(body: &str) -> Result<ElementSet, FetchError> {
    let lines: Vec<&str> = body.lines().collect();
    if lines.len() < 3 {
        return Err(FetchError::MalformedFeed { lines: lines.len() });
    }

    Ok(ElementSet {
        name: lines[0].trim().to_string(),
        line1: lines[1].trim().to_string(),
        line2: lines[2].trim().to_string(),
    })
}
