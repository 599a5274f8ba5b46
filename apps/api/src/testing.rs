//! Test wiring: an `AppState` whose collaborators are all in-memory.

use std::sync::Arc;

use uuid::Uuid;

use crate::cache::memory::MemoryCache;
use crate::cache::CacheKeys;
use crate::config::Config;
use crate::downloads::testing::RecordingGenerator;
use crate::models::resume::PubResume;
use crate::notify::testing::RecordingNotifier;
use crate::render::PageRenderer;
use crate::session::Session;
use crate::state::AppState;
use crate::stores::memory::MemoryStore;

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub downloads: Arc<RecordingGenerator>,
    config: Config,
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            store: Arc::new(MemoryStore::default()),
            cache: Arc::new(MemoryCache::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            downloads: Arc::new(RecordingGenerator::default()),
            config: Config::for_tests(),
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            config: self.config.clone(),
            resumes: self.store.clone(),
            pubs: self.store.clone(),
            users: self.store.clone(),
            shares: self.store.clone(),
            cache: self.cache.clone(),
            cache_keys: CacheKeys::new(self.config.cache_namespace.clone()),
            notifier: self.notifier.clone(),
            downloads: self.downloads.clone(),
            pages: Arc::new(PageRenderer::new().expect("templates compile")),
        }
    }

    /// Registers a user and returns a session for them.
    pub fn user(&self, github_login: &str) -> (Uuid, Session) {
        let user_id = self.store.insert_user(github_login);
        let session = Session {
            user_id,
            github_login: github_login.to_string(),
            locale: "en".to_string(),
            from_download: false,
        };
        (user_id, session)
    }

    /// Publishes a default record for `user_id`.
    pub fn publish(&self, user_id: Uuid) -> PubResume {
        let record = PubResume::new_for(user_id);
        self.store.insert_pub(record.clone());
        record
    }

    /// Stores `session` in the cache under `sid`, as the login flow would.
    pub fn sign_in(&self, sid: &str, session: &Session) {
        let keys = CacheKeys::new(self.config.cache_namespace.clone());
        self.cache.put(
            &keys.session(sid),
            &serde_json::to_string(session).expect("session serializes"),
        );
    }
}
