use crate::consts;
use levenshtein::levenshtein;
use std::collections::HashMap;
use super::{policy::Policy, value::Value};

/// Variable bindings supplied by the caller of an evaluation.
pub type Bindings = HashMap<String, Value>;

/// A context to use when evaluating an expression, containing the variables that can be used
/// within the expression and the [`Policy`] that bounds the evaluation.
///
/// The builtin constants (`e`, `i`, `phi`, `pi`, and `tau`) are always available, but can be
/// shadowed by a variable with the same name.
#[derive(Debug, Clone, Default)]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, Value>,

    /// The policy used while evaluating.
    pub policy: Policy,
}

impl Ctxt {
    /// Creates a new context with no variables and the given policy.
    pub fn new(policy: Policy) -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            policy,
        }
    }

    /// Creates a new context with a copy of the given bindings.
    pub fn with_bindings(bindings: &Bindings, policy: Policy) -> Ctxt {
        Ctxt {
            vars: bindings.clone(),
            policy,
        }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// Remove a variable from the context, so that the name is treated as unknown (or as the
    /// constant of the same name).
    pub fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }

    /// Get the value of a variable or constant in the context.
    pub fn get_var(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned().or_else(|| consts::get(name))
    }

    /// Returns true if the name refers to a variable or constant.
    pub fn has_var(&self, name: &str) -> bool {
        self.vars.contains_key(name) || consts::get(name).is_some()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, Value> {
        &self.vars
    }

    /// Returns all variables and constants with a name similar to the given name, in
    /// alphabetical order.
    pub fn get_similar_vars(&self, name: &str) -> Vec<String> {
        let mut similar = self.vars
            .keys()
            .map(String::as_str)
            .chain(consts::NAMES)
            .filter(|n| levenshtein(n, name) < 2)
            .map(str::to_string)
            .collect::<Vec<_>>();
        similar.sort();
        similar.dedup();
        similar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_shadow_constants() {
        let mut ctxt = Ctxt::default();
        assert_eq!(ctxt.get_var("e"), consts::get("e"));

        ctxt.add_var("e", Value::from(2));
        assert_eq!(ctxt.get_var("e"), Some(Value::from(2)));
    }

    #[test]
    fn similar_names() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::from(1));
        ctxt.add_var("rate", Value::from(1));
        assert_eq!(ctxt.get_similar_vars("pii"), vec!["pi".to_string()]);
        assert_eq!(ctxt.get_similar_vars("rat"), vec!["rate".to_string()]);
        assert_eq!(ctxt.get_similar_vars("y"), vec!["e", "i", "x"]);
    }
}
