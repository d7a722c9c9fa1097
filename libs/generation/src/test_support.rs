use std::{collections::VecDeque, sync::Mutex};

use anyhow::anyhow;

use crate::{LanguageModel, Prompt};

/// Replays canned answers in order and records every prompt it was given.
/// Runs out into errors.
pub struct ScriptedModel {
    answers: Mutex<VecDeque<anyhow::Result<String>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(answers.into_iter().map(|a| Ok(a.into())))
    }

    pub fn with_results(
        answers: impl IntoIterator<Item = anyhow::Result<String>>,
    ) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self::with_results([Err(anyhow!("connection refused"))])
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &Prompt) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted answer left")))
    }
}
