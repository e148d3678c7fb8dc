/// A topic request normalized into its canonical form: the ordered topic
/// list, the boolean-OR search string sent upstream, and the cache key.
///
/// No de-duplication and no sorting: caller-supplied repetition and order are
/// preserved, so "a,b" and "b,a" are distinct cache keys while "A, b" and
/// "a,b" collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuery {
    pub topics: Vec<String>,
    pub query: String,
    pub cache_key: String,
}

impl TopicQuery {
    pub fn parse(input: &str) -> Self {
        let topics: Vec<String> = input
            .split(',')
            .map(|topic| topic.trim().to_lowercase())
            .collect();
        let query = topics.join(" OR ");
        let cache_key = query.to_lowercase();
        Self {
            topics,
            query,
            cache_key,
        }
    }
}
