//! Reconciles a translation catalog with the strings found in a source tree.
//!
//! A [`Reconciler`] lives for one run:
//! 1. [`Reconciler::new`] loads the original translations,
//! 2. [`Reconciler::observe`] is fed every candidate string found by the scanner,
//! 3. [`Reconciler::resolve`] proposes translations for strings the catalog lacks,
//! 4. [`Reconciler::finish`] emits the merged catalog and its [`Summary`].
//!
//! All working sets keep insertion order, so the merged catalog lists entries in
//! catalog order followed by new strings in the order they were first seen, and
//! fuzzy ties go to the earliest catalog entry.

use indexmap::{
    IndexMap,
    IndexSet,
};

use crate::catalog::{
    Catalog,
    Entry,
    Flag,
};
use crate::similarity::similarity;

/// Similarity a guess must exceed to be proposed.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;

/// Translation proposed for a string missing from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub translation: String,
    /// [`Flag::Guessed`] when borrowed from a similar entry, otherwise [`Flag::Missing`].
    pub flag: Flag,
    /// Catalog key that scored best, if any scored above zero.
    pub closest_original: Option<String>,
    pub score: f64,
}

/// Counts describing a finished reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub used: usize,
    pub unused: usize,
    pub missing: usize,
    pub guessed: usize,
}

/// Result of [`Reconciler::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub catalog: Catalog,
    pub summary: Summary,
}

/// Working state of one reconciliation run.
#[derive(Debug, Clone)]
pub struct Reconciler {
    /// Name of the catalog being reconciled
    name: String,
    threshold: f64,
    /// Original string → translation, in catalog order
    original: IndexMap<String, String>,
    /// Original strings not seen in any source yet
    unused: IndexSet<String>,
    /// Strings seen in sources but absent from the catalog, in first-seen order
    missing: IndexSet<String>,
}

impl Reconciler {
    /// Loads the catalog's translations. Entry flags from earlier runs are ignored.
    ///
    /// A string listed twice keeps its first position and its last translation.
    #[must_use]
    pub fn new(catalog: &Catalog, threshold: f64) -> Self {
        let mut original = IndexMap::with_capacity(catalog.entries.len());
        for entry in &catalog.entries {
            original.insert(entry.original.clone(), entry.translation.clone());
        }
        let unused = original.keys().cloned().collect();

        Self { name: catalog.name.clone(), threshold, original, unused, missing: IndexSet::new() }
    }

    /// Records one candidate string found in a source file.
    ///
    /// Repeated sightings of the same string change nothing.
    pub fn observe(&mut self, candidate: &str) {
        if self.original.contains_key(candidate) {
            self.unused.shift_remove(candidate);
        } else if !self.missing.contains(candidate) {
            tracing::debug!(candidate, "New translatable string");
            self.missing.insert(candidate.to_string());
        }
    }

    #[must_use]
    pub fn original(&self) -> &IndexMap<String, String> {
        &self.original
    }

    #[must_use]
    pub const fn unused(&self) -> &IndexSet<String> {
        &self.unused
    }

    #[must_use]
    pub const fn missing(&self) -> &IndexSet<String> {
        &self.missing
    }

    /// Finds the catalog key most similar to `candidate`.
    ///
    /// Only keys scoring above zero qualify; among equal scores the first key wins.
    #[must_use]
    pub fn closest_original(&self, candidate: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for key in self.original.keys() {
            let score = similarity(candidate, key);
            if score > best.map_or(0.0, |(_, best_score)| best_score) {
                best = Some((key.as_str(), score));
            }
        }
        best
    }

    /// Proposes a translation for a string the catalog does not contain.
    #[must_use]
    pub fn propose(&self, candidate: &str) -> Proposal {
        let closest = self.closest_original(candidate);
        let score = closest.map_or(0.0, |(_, score)| score);

        let guess = closest
            .filter(|(_, score)| *score > self.threshold)
            .and_then(|(key, _)| self.original.get(key));

        Proposal {
            translation: guess.map_or_else(|| candidate.to_string(), Clone::clone),
            flag: if guess.is_some() { Flag::Guessed } else { Flag::Missing },
            closest_original: closest.map(|(key, _)| key.to_string()),
            score,
        }
    }

    /// Proposes translations for every missing string, in first-seen order.
    #[must_use]
    pub fn resolve(&self) -> Vec<(&str, Proposal)> {
        self.missing.iter().map(|candidate| (candidate.as_str(), self.propose(candidate))).collect()
    }

    /// Emits the merged catalog: every original entry, flagged `UNUSED` if never
    /// seen, followed by one entry per missing string.
    ///
    /// Missing strings are resolved once; the summary counts the same proposals.
    #[must_use]
    pub fn finish(&self) -> Reconciled {
        let mut catalog = Catalog::new(self.name.as_str());

        for (original, translation) in &self.original {
            let entry = Entry::new(original.as_str(), translation.as_str());
            let entry =
                if self.unused.contains(original) { entry.with_flag(Flag::Unused) } else { entry };
            catalog.entries.push(entry);
        }

        let mut guessed = 0;
        for (candidate, proposal) in self.resolve() {
            tracing::debug!(
                candidate,
                flag = %proposal.flag,
                score = proposal.score,
                closest = proposal.closest_original.as_deref().unwrap_or_default(),
                "Resolved missing string"
            );
            if proposal.flag == Flag::Guessed {
                guessed += 1;
            }
            let entry = Entry::new(candidate, proposal.translation).with_flag(proposal.flag);
            catalog.entries.push(entry);
        }

        let summary = Summary {
            used: self.original.len() - self.unused.len(),
            unused: self.unused.len(),
            missing: self.missing.len() - guessed,
            guessed,
        };
        Reconciled { catalog, summary }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new("fr");
        catalog.entries = pairs.iter().map(|(o, t)| Entry::new(*o, *t)).collect();
        catalog
    }

    #[fixture]
    fn reconciler() -> Reconciler {
        let entries =
            [("Hello", "Bonjour"), ("Load game", "Charger la partie"), ("Quit", "Quitter")];
        Reconciler::new(&catalog(&entries), DEFAULT_FUZZY_THRESHOLD)
    }

    #[rstest]
    fn new_marks_every_original_unused(reconciler: Reconciler) {
        assert_that!(reconciler.original().len(), eq(3));
        assert_that!(
            reconciler.unused().iter().collect::<Vec<_>>(),
            elements_are![eq(&"Hello"), eq(&"Load game"), eq(&"Quit")]
        );
        assert_that!(reconciler.missing(), is_empty());
    }

    #[rstest]
    fn duplicate_originals_keep_last_translation() {
        let reconciler = Reconciler::new(
            &catalog(&[("Yes", "Oui"), ("No", "Non"), ("Yes", "Ouais")]),
            DEFAULT_FUZZY_THRESHOLD,
        );

        assert_that!(
            reconciler.original().iter().collect::<Vec<_>>(),
            elements_are![
                eq(&(&"Yes".to_string(), &"Ouais".to_string())),
                eq(&(&"No".to_string(), &"Non".to_string()))
            ]
        );
    }

    #[rstest]
    fn observe_known_string_marks_it_used(mut reconciler: Reconciler) {
        reconciler.observe("Quit");

        assert!(!reconciler.unused().contains("Quit"));
        assert_that!(reconciler.unused().len(), eq(2));
        assert_that!(reconciler.missing(), is_empty());
    }

    #[rstest]
    fn observe_is_idempotent(mut reconciler: Reconciler) {
        reconciler.observe("Quit");
        reconciler.observe("Options");
        let once = (reconciler.unused().clone(), reconciler.missing().clone());

        reconciler.observe("Quit");
        reconciler.observe("Options");

        assert_that!((reconciler.unused().clone(), reconciler.missing().clone()), eq(&once));
    }

    #[rstest]
    fn observe_keeps_first_seen_order(mut reconciler: Reconciler) {
        reconciler.observe("Zebra");
        reconciler.observe("Apple");
        reconciler.observe("Zebra");

        assert_that!(
            reconciler.missing().iter().collect::<Vec<_>>(),
            elements_are![eq(&"Zebra"), eq(&"Apple")]
        );
    }

    #[rstest]
    fn coverage_of_original_keys(mut reconciler: Reconciler) {
        for candidate in ["Hello", "Unknown", "Quit"] {
            reconciler.observe(candidate);
        }

        let unused = reconciler.unused();
        let used: Vec<&String> =
            reconciler.original().keys().filter(|key| !unused.contains(*key)).collect();
        assert_that!(used, elements_are![eq(&"Hello"), eq(&"Quit")]);
        assert_that!(reconciler.unused().len() + used.len(), eq(reconciler.original().len()));
    }

    #[rstest]
    fn propose_guesses_above_threshold(reconciler: Reconciler) {
        let proposal = reconciler.propose("Load games");

        assert_that!(
            proposal,
            all![
                field!(Proposal.flag, eq(&Flag::Guessed)),
                field!(Proposal.translation, eq("Charger la partie")),
                field!(Proposal.closest_original, some(eq("Load game")))
            ]
        );
        assert!(proposal.score > DEFAULT_FUZZY_THRESHOLD);
    }

    #[rstest]
    fn propose_missing_below_threshold(reconciler: Reconciler) {
        let proposal = reconciler.propose("Goodbye");

        assert_that!(
            proposal,
            all![
                field!(Proposal.flag, eq(&Flag::Missing)),
                field!(Proposal.translation, eq("Goodbye")),
                field!(Proposal.score, eq(&0.0)),
                field!(Proposal.closest_original, none())
            ]
        );
    }

    #[rstest]
    fn propose_with_weak_match_is_missing(reconciler: Reconciler) {
        // HE is the only pair shared with "Hello".
        let proposal = reconciler.propose("Hex");

        assert_that!(proposal.flag, eq(Flag::Missing));
        assert_that!(proposal.closest_original, some(eq("Hello")));
        assert!(proposal.score > 0.0 && proposal.score <= DEFAULT_FUZZY_THRESHOLD);
    }

    #[rstest]
    fn ties_go_to_first_catalog_entry() {
        let reconciler = Reconciler::new(
            &catalog(&[("ab", "first"), ("ab ", "second")]),
            DEFAULT_FUZZY_THRESHOLD,
        );

        let proposal = reconciler.propose("AB");

        assert_that!(proposal.translation, eq("first"));
    }

    #[rstest]
    fn threshold_is_strict() {
        // AB BC CD against AB BC: 2*2/5 = 0.8.
        let reconciler = Reconciler::new(&catalog(&[("abc", "x")]), 0.5);

        let proposal = reconciler.propose("abcd");

        assert_that!(proposal.score, eq(0.8));
        assert_that!(proposal.flag, eq(Flag::Guessed));
        let strict = Reconciler::new(&catalog(&[("abc", "x")]), 0.8);
        assert_that!(strict.propose("abcd").flag, eq(Flag::Missing));
    }

    #[rstest]
    fn finish_emits_originals_then_missing(mut reconciler: Reconciler) {
        for candidate in ["Hello", "Goodbye", "Load games", "Hello"] {
            reconciler.observe(candidate);
        }

        let merged = reconciler.finish().catalog;

        assert_that!(merged.name, eq("fr"));
        assert_that!(
            merged.entries,
            elements_are![
                eq(&Entry::new("Hello", "Bonjour")),
                eq(&Entry::new("Load game", "Charger la partie").with_flag(Flag::Unused)),
                eq(&Entry::new("Quit", "Quitter").with_flag(Flag::Unused)),
                eq(&Entry::new("Goodbye", "Goodbye").with_flag(Flag::Missing)),
                eq(&Entry::new("Load games", "Charger la partie").with_flag(Flag::Guessed))
            ]
        );
    }

    #[rstest]
    fn summary_matches_emitted_flags(mut reconciler: Reconciler) {
        for candidate in ["Hello", "Goodbye", "Load games"] {
            reconciler.observe(candidate);
        }

        let Reconciled { catalog, summary } = reconciler.finish();

        assert_that!(summary, eq(Summary { used: 1, unused: 2, missing: 1, guessed: 1 }));
        let flagged = |flag| catalog.entries.iter().filter(|e| e.flag == Some(flag)).count();
        assert_that!(flagged(Flag::Unused), eq(summary.unused));
        assert_that!(flagged(Flag::Missing), eq(summary.missing));
        assert_that!(flagged(Flag::Guessed), eq(summary.guessed));
    }

    #[rstest]
    fn empty_catalog_flags_everything_missing() {
        let mut reconciler = Reconciler::new(&Catalog::new("empty"), DEFAULT_FUZZY_THRESHOLD);
        reconciler.observe("Start");

        let merged = reconciler.finish().catalog;

        assert_that!(
            merged.entries,
            elements_are![eq(&Entry::new("Start", "Start").with_flag(Flag::Missing))]
        );
    }
}
