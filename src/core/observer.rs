/// A single lookup attempt, as reported to a [`LookupObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    ByName(&'a str),
    ById(i64),
}

impl Lookup<'_> {
    pub fn to_record(&self) -> LookupRecord {
        match *self {
            Lookup::ByName(name) => LookupRecord::ByName(name.to_string()),
            Lookup::ById(id) => LookupRecord::ById(id),
        }
    }
}

/// Owned form of [`Lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRecord {
    ByName(String),
    ById(i64),
}

/// Receives one notification per resolver lookup.
///
/// Notifications are informational; nothing an observer does can change the
/// outcome of a lookup.
pub trait LookupObserver: Send + Sync {
    fn on_lookup(&self, lookup: &Lookup<'_>);
}

/// Emits one `debug` record per lookup through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LookupObserver for LogObserver {
    fn on_lookup(&self, lookup: &Lookup<'_>) {
        match lookup {
            Lookup::ByName(name) => {
                log::debug!(target: "linode_identity::resolver", "looking up instance by name: {}", name)
            }
            Lookup::ById(id) => {
                log::debug!(target: "linode_identity::resolver", "looking up instance by id: {}", id)
            }
        }
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LookupObserver for NoopObserver {
    fn on_lookup(&self, _lookup: &Lookup<'_>) {}
}

/// Simple in-memory collector for lookups.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    lookups: std::sync::Mutex<Vec<LookupRecord>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> Vec<LookupRecord> {
        self.lookups
            .lock()
            .map(|l| l.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl LookupObserver for MemoryObserver {
    fn on_lookup(&self, lookup: &Lookup<'_>) {
        let mut lookups = self
            .lookups
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        lookups.push(lookup.to_record());
    }
}

impl<T: LookupObserver + ?Sized> LookupObserver for std::sync::Arc<T> {
    fn on_lookup(&self, lookup: &Lookup<'_>) {
        (**self).on_lookup(lookup)
    }
}
