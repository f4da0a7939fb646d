use crate::cache::QueryCache;

/// State shared by all the pages of the app
#[derive(Copy, Clone, Debug)]
pub struct GlobalState {
    pub query_cache: QueryCache,
}

impl GlobalState {
    pub fn new() -> Self {
        GlobalState {
            query_cache: QueryCache::new(),
        }
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}
