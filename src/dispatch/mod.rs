//! First-match rule dispatcher.
//!
//! A small, schema-agnostic utility for post-processing items (typically
//! resolved nodes). Every run executes all pre-hooks in registration order,
//! then tests rules in registration order and fires only the first rule whose
//! predicate holds.
//!
//! ```text
//! run(item):
//!   hook 0 .. hook n          always, in order
//!   rule 0? ─no─▶ rule 1? ─yes─▶ action 1   (rules 2.. never tested)
//! ```

/// Runs before any rule predicate.
pub type HookFn<T, C> = Box<dyn Fn(&T, &mut C) + Send + Sync>;

/// Decides whether a rule applies.
pub type PredicateFn<T, C> = Box<dyn Fn(&T, &C) -> bool + Send + Sync>;

/// Work done by the rule that matched.
pub type ActionFn<T, C> = Box<dyn Fn(&T, &mut C) + Send + Sync>;

struct Rule<T, C> {
    predicate: PredicateFn<T, C>,
    action: ActionFn<T, C>,
}

/// Pre-hooks and first-match rules over items of type `T`, sharing a
/// context `C` across runs.
pub struct Dispatcher<T, C> {
    context: C,
    hooks: Vec<HookFn<T, C>>,
    rules: Vec<Rule<T, C>>,
}

impl<T, C: Default> Default for Dispatcher<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C> Dispatcher<T, C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            hooks: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Register a hook that runs on every item before rules are tested.
    pub fn register_pre_hook(&mut self, hook: impl Fn(&T, &mut C) + Send + Sync + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Register a rule; earlier rules take precedence.
    pub fn register_rule(
        &mut self,
        predicate: impl Fn(&T, &C) -> bool + Send + Sync + 'static,
        action: impl Fn(&T, &mut C) + Send + Sync + 'static,
    ) {
        self.rules.push(Rule {
            predicate: Box::new(predicate),
            action: Box::new(action),
        });
    }

    /// Dispatch one item. Returns the index of the rule that fired.
    pub fn run(&mut self, item: &T) -> Option<usize> {
        for hook in &self.hooks {
            hook(item, &mut self.context);
        }

        let index = self
            .rules
            .iter()
            .position(|rule| (rule.predicate)(item, &self.context))?;
        (self.rules[index].action)(item, &mut self.context);
        tracing::trace!("rule {} fired", index);
        Some(index)
    }

    /// Dispatch every item in order, returning the fired rule per item.
    pub fn run_all<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> Vec<Option<usize>>
    where
        T: 'a,
    {
        items.into_iter().map(|item| self.run(item)).collect()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<T, C: std::fmt::Debug> std::fmt::Debug for Dispatcher<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("context", &self.context)
            .field("hooks", &self.hooks.len())
            .field("rules", &self.rules.len())
            .finish()
    }
}
