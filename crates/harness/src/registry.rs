//! Ordered step registry
//!
//! Bindings are tried in registration order and the first pattern that
//! matches the whole step text wins. Patterns may overlap on purpose: register
//! the specific ones before the catch-alls.

use std::fmt;

use async_trait::async_trait;
use regex::Regex;
use tracing::trace;

use crate::context::ExecutionContext;
use crate::error::{HarnessResult, StepError, StepOutcome};

/// Groups captured from a step text, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs {
    groups: Vec<String>,
}

impl StepArgs {
    pub fn new(groups: Vec<String>) -> Self {
        Self { groups }
    }

    /// Captured group `index` (0-based, excluding the whole match)
    pub fn get(&self, index: usize) -> Result<&str, StepError> {
        self.groups
            .get(index)
            .map(String::as_str)
            .ok_or(StepError::MissingArgument(index))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.groups
    }
}

/// Decides whether a step text belongs to a binding
pub trait StepMatcher: Send + Sync {
    /// Captured groups when `text` matches, `None` otherwise
    fn captures(&self, text: &str) -> Option<StepArgs>;

    /// Human-readable pattern, for listings and logs
    fn pattern(&self) -> &str;
}

/// Regex matcher anchored to the whole step text
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    source: String,
    regex: Regex,
}

impl RegexMatcher {
    /// Compile `pattern`, anchoring it at both ends
    pub fn new(pattern: &str) -> HarnessResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }
}

impl StepMatcher for RegexMatcher {
    fn captures(&self, text: &str) -> Option<StepArgs> {
        let caps = self.regex.captures(text)?;
        let groups = caps
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect();
        Some(StepArgs::new(groups))
    }

    fn pattern(&self) -> &str {
        &self.source
    }
}

/// Something a step text can be bound to
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn invoke(&self, ctx: &mut ExecutionContext, args: &StepArgs) -> StepOutcome;
}

/// Adapter for plain synchronous functions and closures
pub struct FnAction<F>(pub F);

#[async_trait]
impl<F> StepAction for FnAction<F>
where
    F: Fn(&mut ExecutionContext, &StepArgs) -> StepOutcome + Send + Sync,
{
    async fn invoke(&self, ctx: &mut ExecutionContext, args: &StepArgs) -> StepOutcome {
        (self.0)(ctx, args)
    }
}

pub struct StepBinding {
    matcher: Box<dyn StepMatcher>,
    action: Box<dyn StepAction>,
}

impl StepBinding {
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }
}

impl fmt::Debug for StepBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepBinding")
            .field("pattern", &self.pattern())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct StepRegistry {
    bindings: Vec<StepBinding>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a regex pattern to an action. Invalid patterns are rejected here.
    pub fn register<A>(&mut self, pattern: &str, action: A) -> HarnessResult<()>
    where
        A: StepAction + 'static,
    {
        let matcher = RegexMatcher::new(pattern)?;
        self.register_matcher(matcher, action);
        Ok(())
    }

    /// Bind a synchronous closure
    pub fn register_fn<F>(&mut self, pattern: &str, f: F) -> HarnessResult<()>
    where
        F: Fn(&mut ExecutionContext, &StepArgs) -> StepOutcome + Send + Sync + 'static,
    {
        self.register(pattern, FnAction(f))
    }

    /// Bind any matcher to an action
    pub fn register_matcher<M, A>(&mut self, matcher: M, action: A)
    where
        M: StepMatcher + 'static,
        A: StepAction + 'static,
    {
        self.bindings.push(StepBinding {
            matcher: Box::new(matcher),
            action: Box::new(action),
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(StepBinding::pattern)
    }

    /// First binding whose pattern matches `text`, with its captured groups
    pub fn resolve(&self, text: &str) -> Option<(&StepBinding, StepArgs)> {
        for binding in &self.bindings {
            if let Some(args) = binding.matcher.captures(text) {
                trace!("'{}' matched /{}/", text, binding.pattern());
                return Some((binding, args));
            }
        }
        None
    }

    /// Resolve `text` and run the bound action. Action failures are returned as-is.
    pub async fn resolve_and_execute(&self, text: &str, ctx: &mut ExecutionContext) -> StepOutcome {
        let (binding, args) = self
            .resolve(text)
            .ok_or_else(|| StepError::NoMatchingStep(text.to_string()))?;
        binding.action.invoke(ctx, &args).await
    }
}
