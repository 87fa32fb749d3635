//! Search Source - paged candidate streams
//!
//! Turns a list of query terms into one lazy stream of [`Candidate`]s by
//! paging through the provider's search endpoint.
//!
//! ## Algorithm
//! For each term, in order:
//! 1. Request page 1, 2, ... up to `max_pages`
//! 2. Emit every hit on the page, tagged with the axis and term
//! 3. Stop the term when the provider reports no more matches, when the
//!    reported total has been seen, or when a page fetch fails or times out
//! 4. Move on to the next term
//!
//! Nothing is fetched until the stream is polled, and dropping the stream
//! part-way cancels whatever page request is in flight.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use omdb_client::{MetadataProvider, ProviderError, SearchPage};
use tracing::{debug, warn};

use crate::types::{Axis, Candidate};

/// Where a term's paging is at
#[derive(Debug, Clone, Copy)]
struct PageCursor {
    next_page: u32,
    seen: u32,
}

/// Generates candidates by paging through provider searches
#[derive(Clone)]
pub struct SearchSource {
    provider: Arc<dyn MetadataProvider>,

    /// Upper bound on pages requested per term
    max_pages: u32,

    /// Deadline for a single page request
    call_timeout: Duration,
}

impl SearchSource {
    /// Create a new search source
    ///
    /// ## Parameters
    /// - `provider`: Shared metadata provider
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            max_pages: 1,
            call_timeout: Duration::from_secs(10),
        }
    }

    /// Configure pages examined per term (default: 1)
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Configure the per-request deadline (default: 10s)
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Stream candidates for every term, one term after another
    pub fn candidates(&self, terms: Vec<String>, axis: Option<Axis>) -> BoxStream<'static, Candidate> {
        let source = self.clone();
        stream::iter(terms)
            .flat_map(move |term| source.term_candidates(term, axis))
            .boxed()
    }

    /// Stream candidates for a single term
    pub fn term_candidates(&self, term: String, axis: Option<Axis>) -> BoxStream<'static, Candidate> {
        let provider = Arc::clone(&self.provider);
        let max_pages = self.max_pages;
        let call_timeout = self.call_timeout;
        let cursor = PageCursor { next_page: 1, seen: 0 };

        let pages_term = term.clone();
        let pages = stream::unfold(Some(cursor), move |cursor| {
            let provider = Arc::clone(&provider);
            let term = pages_term.clone();
            async move {
                let cursor = cursor?;
                if cursor.next_page > max_pages {
                    return None;
                }
                let page_no = cursor.next_page;
                match fetch_page(provider.as_ref(), &term, page_no, call_timeout).await {
                    Ok(page) => {
                        let seen = cursor.seen + page.candidates.len() as u32;
                        let exhausted = page.total_results.is_some_and(|total| seen >= total);
                        debug!(
                            "Term '{}' page {} returned {} hits (seen {})",
                            term,
                            page_no,
                            page.candidates.len(),
                            seen
                        );
                        let next = (!exhausted).then_some(PageCursor {
                            next_page: page_no + 1,
                            seen,
                        });
                        Some(((page_no, page), next))
                    }
                    Err(ProviderError::NoMoreResults) => {
                        debug!("Term '{}' exhausted at page {}", term, page_no);
                        None
                    }
                    Err(e) => {
                        warn!("Search for '{}' page {} failed, skipping rest of term: {}", term, page_no, e);
                        None
                    }
                }
            }
        });

        pages
            .flat_map(move |(page_no, page)| {
                let term = term.clone();
                stream::iter(
                    page.candidates
                        .into_iter()
                        .map(move |movie| Candidate::new(movie, axis, term.clone(), page_no)),
                )
            })
            .boxed()
    }
}

async fn fetch_page(
    provider: &dyn MetadataProvider,
    term: &str,
    page: u32,
    call_timeout: Duration,
) -> Result<SearchPage, ProviderError> {
    match tokio::time::timeout(call_timeout, provider.search_page(term, page)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(call_timeout)),
    }
}
