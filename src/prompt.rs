use crate::category::FileCategory;
use crate::errors::EjectError;
use async_trait::async_trait;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::Mutex;
use tracing::debug;

/// Number of ranked matches shown by the dependency search.
pub const SEARCH_LIMIT: usize = 5;

/// dialoguer's MultiSelect toggles with space only.
const TYPE_SELECT_HINT: &str = "space to select";

/// Answers the two interactive questions of an eject run.
///
/// Both methods return [`EjectError::Cancelled`] when the user aborts.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn select_dependency(&self, candidates: &[String]) -> Result<String, EjectError>;

    async fn select_categories(
        &self,
        dependency: &str,
        available: &[FileCategory],
    ) -> Result<Vec<FileCategory>, EjectError>;
}

/// Orders `candidates` by case-insensitive fuzzy score against `query` and
/// keeps the best [`SEARCH_LIMIT`]. An empty query, or one that scores
/// nothing, returns every candidate in its original order.
pub fn rank_candidates(query: &str, candidates: &[String]) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return candidates.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &String)> = candidates
        .iter()
        .filter_map(|c| matcher.fuzzy_match(c, query).map(|score| (score, c)))
        .collect();

    if scored.is_empty() {
        debug!("No dependency matched {:?}, showing all", query);
        return candidates.to_vec();
    }

    // Stable sort keeps manifest order between equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(SEARCH_LIMIT)
        .map(|(_, c)| c.clone())
        .collect()
}

/// Terminal prompts: a search box plus ranked list for the dependency,
/// checkboxes for the file types.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn select_dependency(&self, candidates: &[String]) -> Result<String, EjectError> {
        let candidates = candidates.to_vec();
        let selection = tokio::task::spawn_blocking(move || -> Result<Option<String>, EjectError> {
            let theme = ColorfulTheme::default();
            let query: String = Input::with_theme(&theme)
                .with_prompt("Which dependency would you like to eject? (type to search)")
                .allow_empty(true)
                .interact_text()?;

            let ranked = rank_candidates(&query, &candidates);
            let picked = Select::with_theme(&theme)
                .with_prompt("Which dependency would you like to eject?")
                .items(&ranked)
                .default(0)
                .interact_opt()?;
            Ok(picked.map(|i| ranked[i].clone()))
        })
        .await
        .map_err(|e| EjectError::Prompt(e.to_string()))??;

        // aesthetics
        println!();
        selection.ok_or_else(|| EjectError::Cancelled("dependency selection".to_owned()))
    }

    async fn select_categories(
        &self,
        _dependency: &str,
        available: &[FileCategory],
    ) -> Result<Vec<FileCategory>, EjectError> {
        let choices = available.to_vec();
        let selection = tokio::task::spawn_blocking(move || {
            let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
            let prompt = format!(
                "Which files do you want to eject into your working directory?\n{}",
                TYPE_SELECT_HINT.green()
            );
            MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&labels)
                .interact_opt()
                .map(|picked| {
                    picked.map(|indices| indices.into_iter().map(|i| choices[i]).collect())
                })
        })
        .await
        .map_err(|e| EjectError::Prompt(e.to_string()))??;

        selection.ok_or_else(|| EjectError::Cancelled("file type selection".to_owned()))
    }
}

/// A scripted reply to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted<T> {
    Answer(T),
    Cancel,
}

/// Pre-seeded answers for non-interactive runs. Each one is only consumed if
/// its question is actually asked.
#[derive(Debug, Clone, Default)]
pub struct InjectedAnswers {
    pub dependency: Option<String>,
    pub categories: Option<Vec<FileCategory>>,
}

/// Replies to each question from its own slot.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    dependency: Mutex<Option<Scripted<String>>>,
    categories: Mutex<Option<Scripted<Vec<FileCategory>>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        ScriptedPrompter::default()
    }

    pub fn with_dependency(self, answer: Scripted<String>) -> Self {
        *lock(&self.dependency) = Some(answer);
        self
    }

    pub fn with_categories(self, answer: Scripted<Vec<FileCategory>>) -> Self {
        *lock(&self.categories) = Some(answer);
        self
    }
}

fn lock<T>(slot: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn take<T: std::fmt::Debug>(slot: &Mutex<Option<Scripted<T>>>, question: &str) -> Result<T, EjectError> {
    let answer = lock(slot)
        .take()
        .ok_or_else(|| EjectError::Prompt(format!("no scripted answer for {}", question)))?;
    debug!("Scripted answer for {}: {:?}", question, answer);
    match answer {
        Scripted::Answer(value) => Ok(value),
        Scripted::Cancel => Err(EjectError::Cancelled(question.to_owned())),
    }
}

impl From<InjectedAnswers> for ScriptedPrompter {
    fn from(injected: InjectedAnswers) -> Self {
        ScriptedPrompter {
            dependency: Mutex::new(injected.dependency.map(Scripted::Answer)),
            categories: Mutex::new(injected.categories.map(Scripted::Answer)),
        }
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select_dependency(&self, candidates: &[String]) -> Result<String, EjectError> {
        let name = take(&self.dependency, "dependency selection")?;
        if !candidates.contains(&name) {
            return Err(EjectError::Prompt(format!(
                "scripted dependency {} is not a candidate",
                name
            )));
        }
        Ok(name)
    }

    async fn select_categories(
        &self,
        dependency: &str,
        available: &[FileCategory],
    ) -> Result<Vec<FileCategory>, EjectError> {
        let picked = take(&self.categories, "file type selection")?;
        if let Some(missing) = picked.iter().find(|c| !available.contains(c)) {
            return Err(EjectError::Prompt(format!(
                "no {} files to eject in {}",
                missing, dependency
            )));
        }
        Ok(picked)
    }
}
