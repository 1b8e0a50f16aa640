//! PageRank over a corpus of linked pages.
//!
//! A [`Corpus`] maps every page to the set of pages it links to. Two
//! estimators turn it into a score distribution summing to 1: a random-surfer
//! sampler and the iterative fixed-point formula.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Probability of following a link instead of jumping to a random page
pub const DAMPING: f64 = 0.85;
/// Surfer steps taken by [`sample_pagerank`] by default
pub const SAMPLES: usize = 10_000;
/// Largest per-page change at which [`iterate_pagerank`] stops
pub const TOLERANCE: f64 = 0.001;
/// Safety stop for graphs that oscillate when damping is 1
pub const MAX_ITERATIONS: usize = 10_000;

/// Page name to score
pub type Ranks = BTreeMap<String, f64>;

/// Directed link graph between pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    links: BTreeMap<String, BTreeSet<String>>,
}

impl Corpus {
    /// Build a corpus, dropping self links and links to pages outside it.
    pub fn new(mut links: BTreeMap<String, BTreeSet<String>>) -> Self {
        let pages: BTreeSet<String> = links.keys().cloned().collect();
        for (page, targets) in links.iter_mut() {
            targets.retain(|target| target != page && pages.contains(target));
        }
        Corpus { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    /// Outgoing links of `page`, or `None` if the page is not in the corpus
    pub fn links(&self, page: &str) -> Option<&BTreeSet<String>> {
        self.links.get(page)
    }
}

impl<P, L, T> FromIterator<(P, L)> for Corpus
where
    P: Into<String>,
    L: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, L)>>(iter: I) -> Self {
        Corpus::new(
            iter.into_iter()
                .map(|(page, targets)| {
                    (page.into(), targets.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

/// Read every `.html` file in `dir` and collect the links between them.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory or a page cannot be read and
/// [`Error::EmptyCorpus`] if it holds no HTML pages.
pub fn crawl(dir: &Path) -> Result<Corpus> {
    let entries = fs::read_dir(dir)
        .map_err(|source| Error::io(format!("read corpus directory {}", dir.display()), source))?;

    let mut links = BTreeMap::new();
    for entry in entries {
        let path = entry
            .map_err(|source| Error::io(format!("list corpus directory {}", dir.display()), source))?
            .path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            warn!(path = %path.display(), "skipping page with non UTF-8 name");
            continue;
        };
        let contents = fs::read_to_string(&path)
            .map_err(|source| Error::io(format!("read page {}", path.display()), source))?;
        links.insert(name.to_string(), extract_links(&contents));
    }

    if links.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let corpus = Corpus::new(links);
    debug!(pages = corpus.len(), dir = %dir.display(), "crawled corpus");
    Ok(corpus)
}

/// Targets of `<a ... href="...">` tags in `html`
fn extract_links(html: &str) -> BTreeSet<String> {
    // ASCII lowercasing keeps byte offsets, so indices carry over to `html`.
    let lower = html.to_ascii_lowercase();
    let mut links = BTreeSet::new();
    let mut cursor = 0;

    while let Some(offset) = lower[cursor..].find("<a") {
        let attrs_start = cursor + offset + 2;
        cursor = attrs_start;
        if !lower[attrs_start..].starts_with(char::is_whitespace) {
            continue;
        }
        let Some(tag_len) = lower[attrs_start..].find('>') else {
            break;
        };
        let attrs_end = attrs_start + tag_len;
        cursor = attrs_end;

        if let Some(href) = lower[attrs_start..attrs_end].find("href=\"") {
            let value_start = attrs_start + href + "href=\"".len();
            if let Some(value_len) = html[value_start..attrs_end].find('"') {
                links.insert(html[value_start..value_start + value_len].to_string());
            }
        }
    }

    links
}

fn validate(corpus: &Corpus, damping: f64) -> Result<()> {
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    if !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidDamping { value: damping });
    }
    Ok(())
}

/// Probability of visiting each page next when the surfer is on `page`.
///
/// With probability `damping` the surfer follows one of `page`'s links, and
/// otherwise jumps to any page uniformly. A page without links (or one not in
/// the corpus) jumps uniformly with probability 1.
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Ranks {
    let total = corpus.len() as f64;
    let links = corpus.links(page).filter(|links| !links.is_empty());

    corpus
        .pages()
        .map(|candidate| {
            let probability = match links {
                None => 1.0 / total,
                Some(links) => {
                    let jump = (1.0 - damping) / total;
                    if links.contains(candidate) {
                        jump + damping / links.len() as f64
                    } else {
                        jump
                    }
                }
            };
            (candidate.to_string(), probability)
        })
        .collect()
}

/// Estimate PageRank by following a random surfer for `samples` steps.
///
/// The first page is drawn uniformly; every visited page counts once. Pages
/// never visited score 0.
///
/// # Errors
///
/// Fails on an empty corpus, a damping factor outside `[0, 1]`, or zero samples.
pub fn sample_pagerank(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
    rng: &mut impl Rng,
) -> Result<Ranks> {
    validate(corpus, damping)?;
    if samples == 0 {
        return Err(Error::InvalidConfiguration {
            message: "sample count must be positive".to_string(),
        });
    }

    let pages: Vec<&str> = corpus.pages().collect();
    let mut visits: BTreeMap<&str, usize> = pages.iter().map(|&page| (page, 0)).collect();
    let mut current = pages[rng.random_range(0..pages.len())];

    for _ in 0..samples {
        *visits.entry(current).or_default() += 1;

        let model = transition_model(corpus, current, damping);
        let weights: Vec<f64> = pages
            .iter()
            .map(|&page| model.get(page).copied().unwrap_or(0.0))
            .collect();
        let next = WeightedIndex::new(&weights).map_err(|err| Error::InvalidConfiguration {
            message: format!("invalid transition weights from '{current}': {err}"),
        })?;
        current = pages[next.sample(rng)];
    }

    Ok(visits
        .into_iter()
        .map(|(page, count)| (page.to_string(), count as f64 / samples as f64))
        .collect())
}

/// Compute PageRank by iterating the PageRank formula to a fixed point.
///
/// Every page starts at `1/N`. A page without links is treated as linking to
/// every page, itself included. Iteration stops once no score moves by more
/// than `tolerance`; the result is normalized to sum to 1.
///
/// # Errors
///
/// Fails on an empty corpus, a damping factor outside `[0, 1]`, or a
/// non-positive tolerance.
pub fn iterate_pagerank(corpus: &Corpus, damping: f64, tolerance: f64) -> Result<Ranks> {
    validate(corpus, damping)?;
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(Error::InvalidConfiguration {
            message: format!("tolerance {tolerance} must be positive"),
        });
    }

    let total = corpus.len() as f64;
    let mut ranks: Ranks = corpus
        .pages()
        .map(|page| (page.to_string(), 1.0 / total))
        .collect();

    let mut iterations = 0;
    loop {
        iterations += 1;
        let next: Ranks = corpus
            .pages()
            .map(|page| {
                let inbound: f64 = corpus
                    .links
                    .iter()
                    .map(|(source, targets)| {
                        let rank = ranks[source];
                        if targets.is_empty() {
                            rank / total
                        } else if targets.contains(page) {
                            rank / targets.len() as f64
                        } else {
                            0.0
                        }
                    })
                    .sum();
                (page.to_string(), (1.0 - damping) / total + damping * inbound)
            })
            .collect();

        let delta = next
            .iter()
            .map(|(page, rank)| (rank - ranks[page]).abs())
            .fold(0.0, f64::max);
        ranks = next;

        if delta <= tolerance {
            debug!(iterations, delta, "pagerank converged");
            break;
        }
        if iterations >= MAX_ITERATIONS {
            warn!(iterations, delta, "pagerank stopped before converging");
            break;
        }
    }

    let sum: f64 = ranks.values().sum();
    ranks.values_mut().for_each(|rank| *rank /= sum);
    Ok(ranks)
}
