//! Pseudonymous per-browser visitor identity.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sitetrack_store::{KeyValueStorage, VISITOR_ID_KEY};

/// Number of random base-36 characters in a generated token.
pub const SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque token identifying one browser instance.
///
/// Only used to count unique visitors locally; it carries no personal data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
    /// Wrap an existing token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build a `visitor_<millis>_<suffix>` token.
    ///
    /// `pick` is called [`SUFFIX_LEN`] times and its result, taken modulo 36,
    /// selects each suffix character.
    pub fn compose(unix_millis: i64, mut pick: impl FnMut() -> usize) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(BASE36[pick() % BASE36.len()]))
            .collect();
        Self(format!("visitor_{unix_millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VisitorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh visitor tokens.
pub trait IdSource {
    fn next_id(&mut self) -> VisitorId;
}

impl<F: FnMut() -> VisitorId> IdSource for F {
    fn next_id(&mut self) -> VisitorId {
        self()
    }
}

/// Generates tokens from the current UTC time and the thread RNG.
#[cfg(feature = "rand")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

#[cfg(feature = "rand")]
impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> VisitorId {
        use rand::Rng;

        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let millis = i64::try_from(millis).unwrap_or(i64::MAX);
        let mut rng = rand::rng();
        VisitorId::compose(millis, || rng.random_range(0..BASE36.len()))
    }
}

/// Outcome of looking up (or creating) the stored identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedIdentity {
    pub id: VisitorId,
    pub created: bool,
}

/// Read the stored identity without creating one.
pub(crate) fn stored_identity<S: KeyValueStorage + ?Sized>(storage: &S) -> Option<VisitorId> {
    match storage.get_item(VISITOR_ID_KEY) {
        Ok(Some(token)) if !token.is_empty() => Some(VisitorId(token)),
        Ok(_) => None,
        Err(e) => {
            warn!("Error reading visitor id: {}", e);
            None
        }
    }
}

/// Reuse the stored identity, or generate and persist a new one.
///
/// If persisting the new token fails it is still used for this visit; the
/// next visit will generate another.
pub(crate) fn resolve_identity<S, I>(storage: &mut S, ids: &mut I) -> ResolvedIdentity
where
    S: KeyValueStorage + ?Sized,
    I: IdSource + ?Sized,
{
    if let Some(id) = stored_identity(&*storage) {
        return ResolvedIdentity { id, created: false };
    }

    let id = ids.next_id();
    match storage.set_item(VISITOR_ID_KEY, id.as_str()) {
        Ok(()) => info!("Created visitor id {}", id),
        Err(e) => warn!("Error saving visitor id {}: {}", id, e),
    }
    ResolvedIdentity { id, created: true }
}
